use uuid::Uuid;

/// Deterministic point identifier for a template: a version-5 UUID of the
/// filename in the URL namespace. The same filename maps to the same id on
/// every run, which is what makes re-indexing an upsert rather than an
/// accumulation, and UUIDs satisfy the vector store's id format.
pub fn template_id(filename: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, filename.as_bytes())
}
