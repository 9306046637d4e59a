/*!
 * Synchronization between the local resource tree and the provider.
 *
 * - `unit`: units of work, their states and aggregated reports
 * - `fanout`: settle-all concurrent execution
 * - `synchronizer`: the push/pull/order operations
 */

pub mod fanout;
pub mod synchronizer;
pub mod unit;

pub use fanout::settle_all;
pub use synchronizer::{ResourceSynchronizer, ALL_LANGUAGES};
pub use unit::{SyncDetail, SyncReport, SyncResult, UnitOfWork, UnitState};
