use std::collections::BTreeMap;
use std::io::Write;

use crate::poll::record::Timestamp;
use crate::series::registry::{SeriesId, SeriesRegistry};
use crate::sink::{ChartPoint, SeriesSink};

#[derive(Debug)]
pub struct Chart {
    registry: SeriesRegistry,
    points: BTreeMap<(Timestamp, SeriesId), f64>,
    upserts: u64,
}

impl Chart {
    pub fn new(registry: SeriesRegistry) -> Self {
        Chart {
            registry,
            points: BTreeMap::new(),
            upserts: 0,
        }
    }

    /// Number of distinct `(x, group)` points held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Upsert calls received, overwrites included.
    pub fn upserts(&self) -> u64 {
        self.upserts
    }

    #[cfg(test)]
    pub fn get(&self, x: Timestamp, group: SeriesId) -> Option<f64> {
        self.points.get(&(x, group)).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = ChartPoint> + '_ {
        self.points
            .iter()
            .map(|(&(x, group), &y)| ChartPoint { x, y, group })
    }

    #[cfg(test)]
    pub fn series_points(&self, group: SeriesId) -> Vec<ChartPoint> {
        self.points().filter(|point| point.group == group).collect()
    }

    /// Writes one row per timestamp, one column per registered series.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["timestamp"];
        header.extend(self.registry.iter().map(|series| series.reading.column()));
        csv.write_record(&header)?;

        let columns = header.len() - 1;
        let mut rows: BTreeMap<Timestamp, Vec<String>> = BTreeMap::new();
        for point in self.points() {
            let Some(column) = self.registry.iter().position(|series| series.id == point.group) else {
                continue;
            };
            let row = rows
                .entry(point.x)
                .or_insert_with(|| vec![String::new(); columns]);
            row[column] = point.y.to_string();
        }

        for (x, values) in rows {
            let mut record = vec![x.to_string()];
            record.extend(values);
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}

impl Default for Chart {
    fn default() -> Self {
        Chart::new(SeriesRegistry::standard())
    }
}

impl SeriesSink for Chart {
    fn upsert(&mut self, point: ChartPoint) {
        self.upserts += 1;
        self.points.insert((point.x, point.group), point.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, group: u8) -> ChartPoint {
        ChartPoint {
            x: Timestamp::from_secs(x),
            y,
            group: SeriesId(group),
        }
    }

    #[test]
    fn test_upsert_overwrites_same_key() {
        let mut chart = Chart::default();
        chart.upsert(point(100.0, 500.0, 0));
        chart.upsert(point(100.0, 510.0, 0));
        chart.upsert(point(100.0, 25.0, 1));

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.upserts(), 3);
        assert_eq!(chart.get(Timestamp::from_secs(100.0), SeriesId(0)), Some(510.0));
        assert_eq!(chart.get(Timestamp::from_secs(100.0), SeriesId(2)), None);
    }

    #[test]
    fn test_series_points_are_time_ordered() {
        let mut chart = Chart::default();
        chart.upsert(point(3.0, 30.0, 2));
        chart.upsert(point(1.0, 10.0, 2));
        chart.upsert(point(2.0, 99.0, 1));

        let xs: Vec<f64> = chart
            .series_points(SeriesId(2))
            .iter()
            .map(|point| point.x.as_secs())
            .collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn test_write_csv() {
        let mut chart = Chart::default();
        chart.upsert(point(100.0, 500.0, 0));
        chart.upsert(point(100.0, 25.0, 1));
        chart.upsert(point(100.0, 150.0, 2));
        chart.upsert(point(101.5, 501.0, 0));

        let mut out = Vec::new();
        chart.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "timestamp,temp_fire,temp_air,temp_bean\n100,500,25,150\n101.5,501,,\n"
        );
    }
}
