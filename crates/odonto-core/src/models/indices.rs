use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// CPO index of the permanent dentition: teeth with active caries (C),
/// missing teeth (P, "perdidos") and filled teeth (O, "obturados").
///
/// `total` is always `C + P + O`. It is derived on construction and on
/// deserialization, so a snapshot can never carry an inconsistent total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct CpoIndices {
    #[serde(rename = "C")]
    c: u32,
    #[serde(rename = "P")]
    p: u32,
    #[serde(rename = "O")]
    o: u32,
    total: u32,
}

impl CpoIndices {
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Build from counts. `total` saturates at `u32::MAX`.
    pub const fn new(c: u32, p: u32, o: u32) -> Self {
        Self {
            c,
            p,
            o,
            total: c.saturating_add(p).saturating_add(o),
        }
    }

    /// Like [`CpoIndices::new`], but `None` when the total does not fit.
    pub fn try_new(c: u32, p: u32, o: u32) -> Option<Self> {
        let total = c.checked_add(p)?.checked_add(o)?;
        Some(Self { c, p, o, total })
    }

    pub fn c(&self) -> u32 {
        self.c
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn o(&self) -> u32 {
        self.o
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

#[derive(Deserialize)]
struct CpoWire {
    #[serde(rename = "C", default)]
    c: u32,
    #[serde(rename = "P", default)]
    p: u32,
    #[serde(rename = "O", default)]
    o: u32,
}

impl<'de> Deserialize<'de> for CpoIndices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CpoWire::deserialize(deserializer)?;
        Self::try_new(wire.c, wire.p, wire.o)
            .ok_or_else(|| D::Error::custom("CPO total overflows u32"))
    }
}

/// ceo-d index of the deciduous dentition: decayed (c), extraction indicated
/// or absent (e) and filled (o) primary teeth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct CeoIndices {
    c: u32,
    e: u32,
    o: u32,
    total: u32,
}

impl CeoIndices {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(c: u32, e: u32, o: u32) -> Self {
        Self {
            c,
            e,
            o,
            total: c.saturating_add(e).saturating_add(o),
        }
    }

    pub fn try_new(c: u32, e: u32, o: u32) -> Option<Self> {
        let total = c.checked_add(e)?.checked_add(o)?;
        Some(Self { c, e, o, total })
    }

    pub fn c(&self) -> u32 {
        self.c
    }

    pub fn e(&self) -> u32 {
        self.e
    }

    pub fn o(&self) -> u32 {
        self.o
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

#[derive(Deserialize)]
struct CeoWire {
    #[serde(default)]
    c: u32,
    #[serde(default)]
    e: u32,
    #[serde(default)]
    o: u32,
}

impl<'de> Deserialize<'de> for CeoIndices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CeoWire::deserialize(deserializer)?;
        Self::try_new(wire.c, wire.e, wire.o)
            .ok_or_else(|| D::Error::custom("ceo-d total overflows u32"))
    }
}
