//! Generation stages and the rules they share

/// Breakability memoisation for the carving loop
pub mod cache;
/// Topology carver: sectioned random-walk mining
pub mod carver;
/// Cardinal connectivity buckets of floor tiles
pub mod connectivity;
/// Biome labeler: multi-front probabilistic expansion
pub mod labeler;
/// End-to-end stage orchestration
pub mod pipeline;
/// Spawn point placer: tiered entry, exit and key selection
pub mod placement;
/// Wall-break legality rules
pub mod rules;
/// VOID trimming of walls outside the playable area
pub mod trimming;
