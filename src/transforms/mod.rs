// Per-topic transforms
//
// One pure function per chart or table: `(dataset, selectors) -> shape`.
// None of them touch rendering; titles and panel ids live in `dashboard`.

pub mod poverty;
pub mod employment;
pub mod wages;
pub mod growth;
pub mod inequality;
pub mod taxation;
pub mod home;

pub use home::{Scorecard, ScoreUnit};
pub use employment::{SignificanceRow, Verdict};
pub use inequality::PopulationCard;
pub use poverty::ProvinceRow;
