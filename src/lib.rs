//! Progress tracker for a fixed curriculum of coding interview problems.

// Solve each problem once, then come back to it after a few days until it sticks. The problem
// set is small and fixed, so everything is a linear pass over one owned list that is written
// back to disk after every change.

/// Main types and traits
pub mod traits;

/// Error types.
pub mod error;

// / Parsing and formatting of the text a user types and reads.
pub mod text;

// / Keeping the problem set on disk.
pub mod store;

// / Selecting the next problem and scheduling reviews.
pub mod scheduler;

// / Applying attempt outcomes.
pub mod recorder;

// / Statistics over the problem set.
pub mod stats;

// / Rendering statistics as text.
pub mod report;

// / Configuration file.
pub mod config;

// / The interactive loop.
pub mod session;

// / Terminal implementation of the prompts.
pub mod terminal;
