use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Form-urlencoded set: everything but `A-Z a-z 0-9 * - . _` is escaped
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Build a share link: `base_url` with any existing `param` pair replaced by
/// `param=<token>`. Other query pairs and the fragment are kept as they are.
pub fn share_link(base_url: &str, param: &str, token: &str) -> String {
    let (without_fragment, fragment) = match base_url.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (base_url, None),
    };
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(k, _)| k);
            form_decode(key) != param
        })
        .map(str::to_string)
        .collect();
    pairs.push(format!("{}={}", form_encode(param), form_encode(token)));

    let mut link = format!("{}?{}", path, pairs.join("&"));
    if let Some(frag) = fragment {
        link.push('#');
        link.push_str(frag);
    }
    link
}

/// Extract the first value of `param` from a URL or a bare query string
/// (with or without the leading `?`). Values are form-decoded.
pub fn query_value(url_or_query: &str, param: &str) -> Option<String> {
    let without_fragment = url_or_query.split('#').next().unwrap_or("");
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => return None,
    };
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (form_decode(key) == param).then(|| form_decode(value))
    })
}

fn form_encode(text: &str) -> String {
    utf8_percent_encode(text, FORM)
        .to_string()
        .replace("%20", "+")
}

fn form_decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
