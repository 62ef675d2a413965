use serde::{Deserialize, Serialize};

use crate::{MonthDay, MonthDayRange, RangeError};

/// Database identifier of a period.
pub type PeriodId = i64;

/// A named, recurring academic period such as "Semester 1": `01-15` to `06-10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord", into = "PeriodRecord")]
pub struct Period {
    id:    PeriodId,
    name:  String,
    range: MonthDayRange,
}

/// Wire shape of a period as the "list all periods" endpoint returns it.
///
/// Accepts both the English field names and the `nombre` / `fecha_inicio` /
/// `fecha_fin` columns of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub id:    PeriodId,
    #[serde(alias = "nombre")]
    pub name:  String,
    #[serde(alias = "fecha_inicio")]
    pub start: MonthDay,
    #[serde(alias = "fecha_fin")]
    pub end:   MonthDay,
}

impl Period {
    /// Creates a period from an already validated range.
    pub fn new(id: PeriodId, name: impl Into<String>, range: MonthDayRange) -> Self {
        Self {
            id,
            name: name.into(),
            range,
        }
    }

    /// Creates a period from raw endpoints.
    ///
    /// # Errors
    /// Returns `RangeError::EndNotAfterStart` if `end <= start`.
    pub fn from_dates(
        id: PeriodId,
        name: impl Into<String>,
        start: MonthDay,
        end: MonthDay,
    ) -> Result<Self, RangeError> {
        Ok(Self::new(id, name, MonthDayRange::new(start, end)?))
    }

    pub const fn id(&self) -> PeriodId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn start(&self) -> MonthDay {
        self.range.start()
    }

    pub const fn end(&self) -> MonthDay {
        self.range.end()
    }

    pub const fn range(&self) -> &MonthDayRange {
        &self.range
    }
}

impl TryFrom<PeriodRecord> for Period {
    type Error = RangeError;

    fn try_from(record: PeriodRecord) -> Result<Self, Self::Error> {
        Self::from_dates(record.id, record.name, record.start, record.end)
    }
}

impl From<Period> for PeriodRecord {
    fn from(period: Period) -> Self {
        Self {
            id:    period.id,
            start: period.start(),
            end:   period.end(),
            name:  period.name,
        }
    }
}
