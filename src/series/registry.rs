use std::fmt;

use crate::poll::record::DataReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(pub u8);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointShape {
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointStyle {
    pub shape: PointShape,
    pub size: u8,
}

/// Which temperature of a data record a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Fire,
    Air,
    Bean,
}

impl Reading {
    pub fn read(&self, reading: &DataReading) -> f64 {
        match self {
            Reading::Fire => reading.temp_fire,
            Reading::Air => reading.temp_air,
            Reading::Bean => reading.temp_bean,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Reading::Fire => "temp_fire",
            Reading::Air => "temp_air",
            Reading::Bean => "temp_bean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: SeriesId,
    pub label: &'static str,
    pub class_name: &'static str,
    pub style: PointStyle,
    pub reading: Reading,
}

const STANDARD_SERIES: [Series; 3] = [
    Series {
        id: SeriesId(0),
        label: "Fire temperature (oC)",
        class_name: "fire",
        style: PointStyle { shape: PointShape::Square, size: 8 },
        reading: Reading::Fire,
    },
    Series {
        id: SeriesId(1),
        label: "Air temperature (oC)",
        class_name: "air",
        style: PointStyle { shape: PointShape::Circle, size: 10 },
        reading: Reading::Air,
    },
    Series {
        id: SeriesId(2),
        label: "Bean temperature (oC)",
        class_name: "bean",
        style: PointStyle { shape: PointShape::Circle, size: 15 },
        reading: Reading::Bean,
    },
];

/// Fixed, id-ordered set of series known to the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRegistry {
    series: Vec<Series>,
}

impl SeriesRegistry {
    pub fn standard() -> Self {
        SeriesRegistry {
            series: STANDARD_SERIES.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    #[cfg(test)]
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|series| series.id == id)
    }
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
