/// Domain-reference content selection used to prime prompts.
///
/// Given a set of topical tags, returns a reduced reference context to
/// prepend to the extraction prompt. Memoization is the caller's concern;
/// this engine treats it as a pure lookup.
pub trait IReferencePrimer: Send + Sync {
    fn primer_for(&self, tags: &[&str]) -> Option<String>;
}
