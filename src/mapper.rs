//! Bidirectional conversion between persisted entities and wire DTOs.

/// Converts `A` into `B` and back.
///
/// Implementors are stateless unit structs, so call sites stay statically
/// dispatched.
pub trait Mapper<A, B> {
    fn map_to(&self, a: A) -> B;

    fn map_from(&self, b: B) -> A;
}
