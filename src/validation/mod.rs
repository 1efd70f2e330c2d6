/*!
 * Subtitle timeline validation.
 *
 * - `timecodes`: overlap, ordering, duration and gap checks
 * - `coverage`: expected word coverage
 * - `service`: runs every check and renders the report
 */

pub mod coverage;
pub mod service;
pub mod timecodes;

pub use coverage::{WordCoverage, check_coverage, collect_words};
pub use service::{Issue, IssueKind, IssueSeverity, TimelineValidator, ValidationReport};
pub use timecodes::{EntryPair, TimecodeValidator};
