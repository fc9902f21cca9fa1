pub mod chart;
pub mod text_log;

use crate::poll::record::Timestamp;
use crate::series::registry::SeriesId;

pub trait LogSink {
    fn append_line(&mut self, line: &str);
    fn scroll_to_bottom(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: Timestamp,
    pub y: f64,
    pub group: SeriesId,
}

/// Insert-or-update of chart points keyed by `(x, group)`.
pub trait SeriesSink {
    fn upsert(&mut self, point: ChartPoint);
}
