use crate::poll::record::{DataReading, Record};
use crate::series::registry::SeriesRegistry;
use crate::sink::{ChartPoint, LogSink, SeriesSink};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub text: usize,
    pub data: usize,
    pub ignored: usize,
}

impl DispatchStats {
    pub fn total(&self) -> usize {
        self.text + self.data + self.ignored
    }

    pub fn add(&mut self, other: DispatchStats) {
        self.text += other.text;
        self.data += other.data;
        self.ignored += other.ignored;
    }
}

/// Routes decoded records to the text log or the chart.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: SeriesRegistry,
}

impl Dispatcher {
    pub fn new(registry: SeriesRegistry) -> Self {
        Dispatcher { registry }
    }

    pub fn dispatch<L, C>(&self, records: &[Record], log: &mut L, chart: &mut C) -> DispatchStats
    where
        L: LogSink + ?Sized,
        C: SeriesSink + ?Sized,
    {
        let mut stats = DispatchStats::default();

        for record in records {
            match record {
                Record::Text { message } => {
                    log.append_line(message);
                    log.scroll_to_bottom();
                    stats.text += 1;
                }
                Record::Data(reading) => {
                    self.plot(reading, chart);
                    stats.data += 1;
                }
                Record::Unknown => stats.ignored += 1,
            }
        }

        stats
    }

    fn plot<C>(&self, reading: &DataReading, chart: &mut C)
    where
        C: SeriesSink + ?Sized,
    {
        for series in self.registry.iter() {
            chart.upsert(ChartPoint {
                x: reading.timestamp,
                y: series.reading.read(reading),
                group: series.id,
            });
        }
    }
}
