use uuid::Uuid;

/// Source of opaque identifiers for categories and items.
///
/// Implementations never fail. No registry of issued ids is kept; uniqueness
/// comes from entropy (or, for [`SequentialIds`], from the counter).
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random ids: `id-` followed by a v4 UUID in simple (hyphenless) form
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        generate_id()
    }
}

/// Deterministic ids `id-1`, `id-2`, … for fixtures and tests
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds::default()
    }

    /// Start numbering after `n` (the first id issued is `id-{n+1}`)
    pub fn starting_after(n: u64) -> Self {
        SequentialIds { next: n }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("id-{}", self.next)
    }
}

/// Generate a fresh random id
pub fn generate_id() -> String {
    format!("id-{}", Uuid::new_v4().simple())
}
