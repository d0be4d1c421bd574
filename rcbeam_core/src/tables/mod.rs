//! # Code Tables
//!
//! Read-only coefficient tables from IS 456:2000 and SP 16 with linear
//! interpolation.
//!
//! ## Lookup Contract
//!
//! ```text
//! lookup(table, column, x) -> TableValue
//! ```
//!
//! - `x` on a knot returns the tabulated value exactly
//! - `x` between knots is linearly interpolated
//! - `x` outside the tabulated domain is **clamped** to the nearest boundary
//!   value and the returned [`TableValue`] says which side was clamped
//!
//! Clamping is kept for parity with the established behaviour of the engine;
//! the orchestrator surfaces every clamp as an informational record rather
//! than rejecting the input.
//!
//! Columns resolve to the nearest tabulated column at or below the requested
//! grade (Table 19 tabulates "M40 and above" as one column); single-column
//! tables ignore the selector.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::ConcreteGrade;
//! use rcbeam_core::tables::{lookup, TableColumn, TableId};
//!
//! let tc = lookup(TableId::DesignShearStrength, TableColumn::Concrete(ConcreteGrade::M25), 1.0);
//! assert_eq!(tc.value, 0.64);
//! assert!(!tc.was_clamped());
//! ```

pub mod is456;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::clause;
use crate::errors::{DesignErrorCode, ErrorRecord, Severity};
use crate::materials::{ConcreteGrade, SteelGrade};

/// Identifier of a code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableId {
    /// IS 456 Table 19: τc vs. pt and concrete grade
    DesignShearStrength,
    /// IS 456 Table 20: τc,max vs. fck
    MaxShearStress,
    /// IS 456 Cl. 26.2.1.1: τbd vs. fck (plain bars in tension)
    BondStress,
    /// IS 456 Cl. 38.1: xu,max/d vs. fy
    NeutralAxisLimit,
    /// SP 16 Table A: design stress vs. strain
    SteelDesignStress,
}

impl TableId {
    /// All tables, in registry order
    pub const ALL: [TableId; 5] = [
        TableId::DesignShearStrength,
        TableId::MaxShearStress,
        TableId::BondStress,
        TableId::NeutralAxisLimit,
        TableId::SteelDesignStress,
    ];

    fn index(&self) -> usize {
        match self {
            TableId::DesignShearStrength => 0,
            TableId::MaxShearStress => 1,
            TableId::BondStress => 2,
            TableId::NeutralAxisLimit => 3,
            TableId::SteelDesignStress => 4,
        }
    }

    /// Code citation for this table
    pub fn citation(&self) -> &'static str {
        match self {
            TableId::DesignShearStrength => clause::DESIGN_SHEAR_STRENGTH,
            TableId::MaxShearStress => clause::MAX_SHEAR_STRESS,
            TableId::BondStress => clause::BOND_STRESS,
            TableId::NeutralAxisLimit => clause::NEUTRAL_AXIS_LIMIT,
            TableId::SteelDesignStress => clause::STEEL_STRESS_STRAIN,
        }
    }

    /// Name of the continuous input variable
    pub fn input_name(&self) -> &'static str {
        match self {
            TableId::DesignShearStrength => "steel percentage",
            TableId::MaxShearStress | TableId::BondStress => "fck",
            TableId::NeutralAxisLimit => "fy",
            TableId::SteelDesignStress => "strain",
        }
    }
}

/// Discrete column selector of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableColumn {
    /// Tables with a single value column
    Single,
    Concrete(ConcreteGrade),
    Steel(SteelGrade),
}

/// Which boundary a clamped input was pulled back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampSide {
    Below,
    Above,
}

/// Result of a table lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableValue {
    pub table: TableId,
    /// Column actually read (may differ from the requested one, see module docs)
    pub column: TableColumn,
    /// Input as supplied
    pub input: f64,
    /// Input actually evaluated (the boundary knot when clamped)
    pub evaluated_at: f64,
    pub value: f64,
    pub clamped: Option<ClampSide>,
}

impl TableValue {
    pub fn was_clamped(&self) -> bool {
        self.clamped.is_some()
    }

    /// Informational record describing a clamp, if one happened
    pub fn clamp_record(&self) -> Option<ErrorRecord> {
        let side = self.clamped?;
        let direction = match side {
            ClampSide::Below => "below",
            ClampSide::Above => "above",
        };
        Some(
            ErrorRecord::new(
                DesignErrorCode::TableInputClamped,
                Severity::Info,
                format!(
                    "{} = {} is {} the tabulated range; value at {} used ({})",
                    self.table.input_name(),
                    self.input,
                    direction,
                    self.evaluated_at,
                    self.value
                ),
                self.table.citation(),
            )
            .with_suggestion("Confirm the input is intended; tabulated boundary values were applied"),
        )
    }
}

/// One code table: strictly increasing knots and one value series per column
#[derive(Debug, Clone)]
pub struct CodeTable {
    pub id: TableId,
    knots: Vec<f64>,
    columns: Vec<(TableColumn, Vec<f64>)>,
}

impl CodeTable {
    fn new(id: TableId, knots: &[f64]) -> Self {
        Self {
            id,
            knots: knots.to_vec(),
            columns: Vec::new(),
        }
    }

    fn with_column(mut self, column: TableColumn, values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), self.knots.len());
        self.columns.push((column, values.to_vec()));
        self
    }

    /// Tabulated knots of the continuous input
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Tabulated columns
    pub fn columns(&self) -> impl Iterator<Item = TableColumn> + '_ {
        self.columns.iter().map(|(c, _)| *c)
    }

    fn resolve(&self, requested: TableColumn) -> (TableColumn, &[f64]) {
        if let Some((c, v)) = self.columns.iter().find(|(c, _)| *c == requested) {
            return (*c, v.as_slice());
        }
        let fallback = match requested {
            TableColumn::Concrete(grade) => self
                .columns
                .iter()
                .filter(|(c, _)| matches!(c, TableColumn::Concrete(g) if *g <= grade))
                .last(),
            TableColumn::Steel(grade) => self
                .columns
                .iter()
                .filter(|(c, _)| matches!(c, TableColumn::Steel(g) if *g <= grade))
                .last(),
            TableColumn::Single => None,
        };
        let (c, v) = fallback.unwrap_or(&self.columns[0]);
        (*c, v.as_slice())
    }

    /// Look up `x` in `column`
    pub fn lookup(&self, column: TableColumn, x: f64) -> TableValue {
        let (resolved, values) = self.resolve(column);
        let (value, evaluated_at, clamped) = interpolate(&self.knots, values, x);
        TableValue {
            table: self.id,
            column: resolved,
            input: x,
            evaluated_at,
            value,
            clamped,
        }
    }
}

/// Linear interpolation over `(xs, ys)` with boundary clamping.
///
/// Returns `(value, evaluated_at, clamped)`. `xs` must be strictly increasing
/// and non-empty. A NaN input yields a NaN value.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> (f64, f64, Option<ClampSide>) {
    let first = xs[0];
    let last = xs[xs.len() - 1];

    if x.is_nan() {
        return (f64::NAN, x, None);
    }
    if x < first {
        return (ys[0], first, Some(ClampSide::Below));
    }
    if x > last {
        return (ys[ys.len() - 1], last, Some(ClampSide::Above));
    }

    // xs[i - 1] <= x < xs[i], or i == len when x == last
    let i = xs.partition_point(|&k| k <= x);
    let (x0, y0) = (xs[i - 1], ys[i - 1]);
    if x == x0 || i == xs.len() {
        return (y0, x, None);
    }
    let (x1, y1) = (xs[i], ys[i]);
    (y0 + (y1 - y0) * (x - x0) / (x1 - x0), x, None)
}

/// Registry of all code tables, built once and never written afterwards
pub struct CodeTables {
    tables: [CodeTable; 5],
}

impl CodeTables {
    fn build() -> Self {
        Self {
            tables: TableId::ALL.map(build_table),
        }
    }

    pub fn get(&self, id: TableId) -> &CodeTable {
        &self.tables[id.index()]
    }
}

fn build_table(id: TableId) -> CodeTable {
    match id {
        TableId::DesignShearStrength => CodeTable::new(id, &is456::SHEAR_PT)
            .with_column(TableColumn::Concrete(ConcreteGrade::M15), &is456::SHEAR_TC_M15)
            .with_column(TableColumn::Concrete(ConcreteGrade::M20), &is456::SHEAR_TC_M20)
            .with_column(TableColumn::Concrete(ConcreteGrade::M25), &is456::SHEAR_TC_M25)
            .with_column(TableColumn::Concrete(ConcreteGrade::M30), &is456::SHEAR_TC_M30)
            .with_column(TableColumn::Concrete(ConcreteGrade::M35), &is456::SHEAR_TC_M35)
            .with_column(TableColumn::Concrete(ConcreteGrade::M40), &is456::SHEAR_TC_M40),
        TableId::MaxShearStress => {
            CodeTable::new(id, &is456::GRADE_FCK).with_column(TableColumn::Single, &is456::MAX_SHEAR_STRESS)
        }
        TableId::BondStress => {
            CodeTable::new(id, &is456::GRADE_FCK).with_column(TableColumn::Single, &is456::BOND_STRESS)
        }
        TableId::NeutralAxisLimit => {
            CodeTable::new(id, &is456::STEEL_FY).with_column(TableColumn::Single, &is456::NEUTRAL_AXIS_LIMIT)
        }
        TableId::SteelDesignStress => SteelCurveTable::build(),
    }
}

/// The stress-strain curves have different knots per grade, so each grade is
/// stored as its own sub-table and merged behind one [`CodeTable`] facade.
struct SteelCurveTable;

impl SteelCurveTable {
    fn build() -> CodeTable {
        // Union of all strain knots; each curve is resampled onto it exactly,
        // which keeps every original knot a knot of the merged table.
        let curves: [(SteelGrade, &[f64], &[f64]); 3] = [
            (SteelGrade::Fe250, &is456::FE250_STRAIN, &is456::FE250_STRESS),
            (SteelGrade::Fe415, &is456::FE415_STRAIN, &is456::FE415_STRESS),
            (SteelGrade::Fe500, &is456::FE500_STRAIN, &is456::FE500_STRESS),
        ];
        let mut knots: Vec<f64> = curves.iter().flat_map(|(_, xs, _)| xs.iter().copied()).collect();
        knots.sort_by(f64::total_cmp);
        knots.dedup();

        let mut table = CodeTable::new(TableId::SteelDesignStress, &knots);
        for (grade, xs, ys) in curves {
            let resampled: Vec<f64> = knots.iter().map(|&k| interpolate(xs, ys, k).0).collect();
            table = table.with_column(TableColumn::Steel(grade), &resampled);
        }
        table
    }
}

/// Process-wide code tables
pub static CODE_TABLES: Lazy<CodeTables> = Lazy::new(CodeTables::build);

/// Look up a value in a code table
pub fn lookup(table: TableId, column: TableColumn, x: f64) -> TableValue {
    CODE_TABLES.get(table).lookup(column, x)
}

// ============================================================================
// Typed accessors
// ============================================================================

/// Design shear strength of concrete τc (Table 19)
pub fn design_shear_strength(grade: ConcreteGrade, pt_percent: f64) -> TableValue {
    lookup(TableId::DesignShearStrength, TableColumn::Concrete(grade), pt_percent)
}

/// Maximum shear stress τc,max (Table 20)
pub fn max_shear_stress(grade: ConcreteGrade) -> TableValue {
    lookup(TableId::MaxShearStress, TableColumn::Single, grade.fck())
}

/// Design bond stress τbd for plain bars in tension (Cl. 26.2.1.1)
pub fn bond_stress(grade: ConcreteGrade) -> TableValue {
    lookup(TableId::BondStress, TableColumn::Single, grade.fck())
}

/// Limiting neutral-axis depth ratio xu,max/d (Cl. 38.1)
pub fn neutral_axis_limit(grade: SteelGrade) -> TableValue {
    lookup(TableId::NeutralAxisLimit, TableColumn::Single, grade.fy())
}

/// Design stress at `strain` from the design stress-strain curve.
///
/// Symmetric in tension and compression: a negative strain returns the
/// negated stress for |strain|.
pub fn steel_design_stress(grade: SteelGrade, strain: f64) -> f64 {
    let v = lookup(TableId::SteelDesignStress, TableColumn::Steel(grade), strain.abs());
    v.value.copysign(strain)
}
