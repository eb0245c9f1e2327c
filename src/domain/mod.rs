// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works on: a tweet record read from CSV, and the abstraction
// over anything that can hand us those records.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One labelled or unlabelled tweet
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;
