// ==========================================
// Zuidplas Logistics - Allocation Engine
// ==========================================
// Batch enumerator over a fixed strategy set:
// standard, neighbour truck, overflow via carrier, external truck.
// Options are scored against each other and ranked (stable).
// ==========================================
// Input: per-route standard/Danish cart totals
// Output: ranked AllocationOption list
// ==========================================

mod core;
mod scoring;
mod strategies;


pub use self::core::{AllocationEngine, SlotEvaluation};
