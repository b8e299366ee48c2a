//! Property-based tests for the Kasparro console
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `status_band_props`: score banding
//!   - Monotonic in score for a fixed maximum
//!   - Scale invariant (k*score / k*max lands in the same band)
//!   - Never `Unknown` for a non-zero maximum
//!
//! - `mapping_props`: presentation lookups
//!   - Every lookup is total over the lenient string parse
//!   - Unrecognised strings map to the neutral bucket
//!
//! - `selection_props`: the selection store
//!   - Sidebar toggling has even/odd parity
//!   - The last write wins for brand and module

mod mapping_props;
mod selection_props;
mod status_band_props;
