//! # Reinforcement Detailing
//!
//! Turns required steel areas into bars, and reports anchorage and lap
//! lengths per IS 456:2000 Cl. 26.
//!
//! ## Bond and Anchorage
//!
//! ```text
//! τbd  = Table value × 1.6 (deformed) × 1.25 (compression)
//! Ld   = φ (0.87 fy) / (4 τbd)
//! lap  = max(Ld, 30 φ) in tension (2 Ld for direct tension)
//!        max(Ld,c, 24 φ) in compression
//!        never less than max(15 φ, 200 mm)
//! ```
//!
//! ## Bar Selection
//!
//! Candidates are single-diameter arrangements from the allowed list; mixed
//! pairs of two diameters are only considered when no single diameter fits.
//! A layer of one diameter holds `⌊(w + s)/(φ + s)⌋` bars, where `w` is the
//! width inside the stirrups and `s = max(φ, aggregate + 5, 25)` is the clear
//! spacing of the largest bar. Mixed pairs are packed large bars first, so
//! smaller bars can use width a full layer of large bars leaves over. Among
//! feasible arrangements the winner has the fewest bars, then the least area,
//! then the larger diameter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    clause, AGGREGATE_SPACING_ALLOWANCE_MM, COMPRESSION_BOND_FACTOR, COMPRESSION_LAP_MIN_DIAMETERS,
    DEFORMED_BAR_BOND_FACTOR, DIRECT_TENSION_LAP_FACTOR, LAP_FLOOR_DIAMETERS, LAP_FLOOR_MM, MIN_BARS,
    MIN_CLEAR_BAR_SPACING_MM, SIDE_FACE_DEPTH_LIMIT_MM, SIDE_FACE_STEEL_FRACTION, STEEL_DESIGN_FACTOR,
    TENSION_LAP_MIN_DIAMETERS,
};
use crate::errors::{worst_status, CalcResult, DesignErrorCode, DesignStatus, ErrorRecord, Severity};
use crate::materials::{bar_area, BarSurface, ConcreteGrade, MaterialGrade, SteelGrade};
use crate::section::BeamSection;
use crate::settings::{ResolvedDetailing, SpliceKind};
use crate::tables::{self, TableValue};
use crate::validation::{require_non_negative, validate_clear_width, validate_section};

/// A number of bars of one diameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub diameter_mm: f64,
    pub count: u32,
}

impl BarGroup {
    pub fn area_mm2(&self) -> f64 {
        self.count as f64 * bar_area(self.diameter_mm)
    }
}

impl std::fmt::Display for BarGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}φ", self.count, self.diameter_mm)
    }
}

/// Bars chosen for one face of the beam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "groups": [{ "diameter_mm": 28.0, "count": 2 }],
///   "total_bars": 2,
///   "area_mm2": 1231.5,
///   "layers": 1,
///   "bars_per_layer": 4,
///   "clear_spacing_mm": 28.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarArrangement {
    /// Largest diameter first
    pub groups: Vec<BarGroup>,
    pub total_bars: u32,
    /// Provided area (mm²)
    pub area_mm2: f64,
    pub layers: u32,
    /// Capacity of one layer at the governing diameter
    pub bars_per_layer: u32,
    /// Minimum clear spacing between bars (mm)
    pub clear_spacing_mm: f64,
}

impl BarArrangement {
    pub fn largest_diameter_mm(&self) -> f64 {
        self.groups.iter().map(|g| g.diameter_mm).fold(0.0, f64::max)
    }

    pub fn smallest_diameter_mm(&self) -> f64 {
        self.groups.iter().map(|g| g.diameter_mm).fold(f64::INFINITY, f64::min)
    }

    /// Short description, e.g. "3-25φ + 2-20φ"
    pub fn description(&self) -> String {
        self.groups.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(" + ")
    }

    fn distinct_diameters(&self) -> usize {
        self.groups.len()
    }

    fn preference(&self, other: &Self) -> Ordering {
        self.distinct_diameters()
            .cmp(&other.distinct_diameters())
            .then(self.total_bars.cmp(&other.total_bars))
            .then(self.area_mm2.total_cmp(&other.area_mm2))
            .then(other.largest_diameter_mm().total_cmp(&self.largest_diameter_mm()))
    }
}

/// Anchorage and lap lengths for one bar diameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorageLengths {
    pub diameter_mm: f64,
    /// Design bond stress in tension, surface factor applied (N/mm²)
    pub bond_stress_tension_n_mm2: f64,
    /// Design bond stress in compression (N/mm²)
    pub bond_stress_compression_n_mm2: f64,
    pub development_length_tension_mm: f64,
    pub development_length_compression_mm: f64,
    pub lap_length_tension_mm: f64,
    pub lap_length_compression_mm: f64,
    pub development_clause: String,
    pub lap_clause: String,
}

/// Side-face bars for deep webs (Cl. 26.5.1.3)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideFaceReinforcement {
    pub total_area_mm2: f64,
    pub area_per_face_mm2: f64,
}

/// Detailing output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailingResult {
    /// `None` when no arrangement fits
    pub tension_bars: Option<BarArrangement>,
    /// Present only for doubly reinforced sections
    pub compression_bars: Option<BarArrangement>,
    /// Lengths for the largest tension bar
    pub tension_anchorage: Option<AnchorageLengths>,
    /// Lengths for the largest compression bar
    pub compression_anchorage: Option<AnchorageLengths>,
    pub side_face: Option<SideFaceReinforcement>,
    /// Width available to bars inside the stirrups (mm)
    pub clear_width_mm: f64,
    pub bar_surface: BarSurface,
    pub splice: SpliceKind,
    pub status: DesignStatus,
    pub records: Vec<ErrorRecord>,
    pub table_lookups: Vec<TableValue>,
}

impl DetailingResult {
    /// Provided tension steel area, if bars were found
    pub fn provided_tension_area_mm2(&self) -> Option<f64> {
        self.tension_bars.as_ref().map(|b| b.area_mm2)
    }
}

/// Design bond stress τbd in tension and compression
pub fn design_bond_stress(concrete: ConcreteGrade, surface: BarSurface) -> (f64, f64, TableValue) {
    let table = tables::bond_stress(concrete);
    let tension = match surface {
        BarSurface::Plain => table.value,
        BarSurface::Deformed => table.value * DEFORMED_BAR_BOND_FACTOR,
    };
    (tension, tension * COMPRESSION_BOND_FACTOR, table)
}

/// Ld = φ σs / (4 τbd) with σs = 0.87 fy
pub fn development_length(diameter_mm: f64, steel: SteelGrade, bond_stress: f64) -> f64 {
    diameter_mm * STEEL_DESIGN_FACTOR * steel.fy() / (4.0 * bond_stress)
}

fn lap_floor(diameter_mm: f64) -> f64 {
    (LAP_FLOOR_DIAMETERS * diameter_mm).max(LAP_FLOOR_MM)
}

/// Lap length for bars in tension
pub fn tension_lap_length(diameter_mm: f64, development_length_mm: f64, splice: SpliceKind) -> f64 {
    let ld = match splice {
        SpliceKind::FlexuralTension => development_length_mm,
        SpliceKind::DirectTension => DIRECT_TENSION_LAP_FACTOR * development_length_mm,
    };
    ld.max(TENSION_LAP_MIN_DIAMETERS * diameter_mm).max(lap_floor(diameter_mm))
}

/// Lap length for bars in compression
pub fn compression_lap_length(diameter_mm: f64, development_length_mm: f64) -> f64 {
    development_length_mm
        .max(COMPRESSION_LAP_MIN_DIAMETERS * diameter_mm)
        .max(lap_floor(diameter_mm))
}

/// All anchorage quantities for one diameter
pub fn anchorage_lengths(
    diameter_mm: f64,
    grades: &MaterialGrade,
    surface: BarSurface,
    splice: SpliceKind,
) -> AnchorageLengths {
    let (tbd_t, tbd_c, _) = design_bond_stress(grades.concrete, surface);
    let ld_t = development_length(diameter_mm, grades.steel, tbd_t);
    let ld_c = development_length(diameter_mm, grades.steel, tbd_c);
    AnchorageLengths {
        diameter_mm,
        bond_stress_tension_n_mm2: tbd_t,
        bond_stress_compression_n_mm2: tbd_c,
        development_length_tension_mm: ld_t,
        development_length_compression_mm: ld_c,
        lap_length_tension_mm: tension_lap_length(diameter_mm, ld_t, splice),
        lap_length_compression_mm: compression_lap_length(diameter_mm, ld_c),
        development_clause: clause::DEVELOPMENT_LENGTH.to_string(),
        lap_clause: clause::LAP_SPLICE.to_string(),
    }
}

/// Minimum clear spacing between bars of `diameter_mm` (Cl. 26.3.2)
pub fn clear_bar_spacing(diameter_mm: f64, aggregate_size_mm: f64) -> f64 {
    diameter_mm
        .max(aggregate_size_mm + AGGREGATE_SPACING_ALLOWANCE_MM)
        .max(MIN_CLEAR_BAR_SPACING_MM)
}

/// Bars of `diameter_mm` that fit in one layer of `clear_width_mm`
pub fn bars_per_layer(clear_width_mm: f64, diameter_mm: f64, aggregate_size_mm: f64) -> u32 {
    let s = clear_bar_spacing(diameter_mm, aggregate_size_mm);
    let n = ((clear_width_mm + s) / (diameter_mm + s)).floor();
    if n.is_finite() && n > 0.0 {
        n as u32
    } else {
        0
    }
}

/// Layers needed to place `groups` in order, each bar going into the current
/// layer while `Σφ + (n - 1) s <= clear_width_mm`.
pub fn layers_needed(groups: &[BarGroup], clear_width_mm: f64, spacing_mm: f64) -> u32 {
    let mut layers = 0;
    let mut used = f64::INFINITY;
    for group in groups {
        for _ in 0..group.count {
            let next = used + spacing_mm + group.diameter_mm;
            if next <= clear_width_mm {
                used = next;
            } else {
                layers += 1;
                used = group.diameter_mm;
            }
        }
    }
    layers
}

/// Choose bars providing at least `required_mm2`, or `None` when nothing fits.
pub fn select_bars(required_mm2: f64, clear_width_mm: f64, options: &ResolvedDetailing) -> Option<BarArrangement> {
    let diameters = &options.bar_diameters_mm;
    let agg = options.aggregate_size_mm;

    // Layer capacity at the governing (largest) diameter, or None below two bars
    let capacity = |governing: f64| -> Option<(u32, f64)> {
        let per_layer = bars_per_layer(clear_width_mm, governing, agg);
        (per_layer >= MIN_BARS).then(|| (per_layer, clear_bar_spacing(governing, agg)))
    };
    let arrange = |groups: Vec<BarGroup>, per_layer: u32, spacing: f64| -> Option<BarArrangement> {
        let layers = layers_needed(&groups, clear_width_mm, spacing);
        if layers > options.max_layers {
            return None;
        }
        Some(BarArrangement {
            area_mm2: groups.iter().map(BarGroup::area_mm2).sum(),
            total_bars: groups.iter().map(|g| g.count).sum(),
            layers,
            groups,
            bars_per_layer: per_layer,
            clear_spacing_mm: spacing,
        })
    };
    let count_for = |area: f64, diameter: f64, floor: u32| ((area / bar_area(diameter)).ceil().max(0.0) as u32).max(floor);

    let singles = diameters.iter().filter_map(|&dia| {
        let (per_layer, spacing) = capacity(dia)?;
        let count = count_for(required_mm2, dia, MIN_BARS);
        arrange(vec![BarGroup { diameter_mm: dia, count }], per_layer, spacing)
    });
    if let Some(best) = singles.min_by(|a, b| a.preference(b)) {
        return Some(best);
    }

    let mut mixed: Vec<BarArrangement> = Vec::new();
    for (i, &small) in diameters.iter().enumerate() {
        for &large in &diameters[i + 1..] {
            let Some((per_layer, spacing)) = capacity(large) else {
                continue;
            };
            for n_large in 1..=per_layer * options.max_layers {
                let remaining = required_mm2 - n_large as f64 * bar_area(large);
                let n_small = count_for(remaining, small, 1);
                let groups = vec![
                    BarGroup { diameter_mm: large, count: n_large },
                    BarGroup { diameter_mm: small, count: n_small },
                ];
                mixed.extend(arrange(groups, per_layer, spacing));
            }
        }
    }
    mixed.into_iter().min_by(|a, b| a.preference(b))
}

/// Side-face steel for webs deeper than 750 mm
pub fn side_face_reinforcement(section: &BeamSection) -> Option<SideFaceReinforcement> {
    if section.overall_depth() <= SIDE_FACE_DEPTH_LIMIT_MM {
        return None;
    }
    let total = SIDE_FACE_STEEL_FRACTION * section.gross_area_mm2();
    Some(SideFaceReinforcement {
        total_area_mm2: total,
        area_per_face_mm2: total / 2.0,
    })
}

fn bars_do_not_fit(face: &str, required_mm2: f64, clear_width_mm: f64, options: &ResolvedDetailing) -> ErrorRecord {
    ErrorRecord::new(
        DesignErrorCode::BarsDoNotFit,
        Severity::SectionInadequate,
        format!(
            "No arrangement of {:?} mm bars provides {:.0} mm² of {} steel within {} layer(s) of {:.0} mm clear width",
            options.bar_diameters_mm, required_mm2, face, options.max_layers, clear_width_mm
        ),
        clause::BAR_SPACING,
    )
    .with_suggestion("Increase the beam width")
    .with_suggestion("Allow more layers or larger bar diameters")
}

/// Detail tension (and compression) steel for the required areas.
pub fn design_detailing(
    section: &BeamSection,
    grades: &MaterialGrade,
    ast_required_mm2: f64,
    asc_required_mm2: f64,
    options: &ResolvedDetailing,
) -> CalcResult<DetailingResult> {
    validate_section(section)?;
    validate_clear_width(section, options)?;
    require_non_negative("ast_mm2", ast_required_mm2)?;
    require_non_negative("asc_mm2", asc_required_mm2)?;

    let clear_width = options.clear_width_mm(section.b());
    let (_, _, bond_table) = design_bond_stress(grades.concrete, options.bar_surface);
    let mut records: Vec<ErrorRecord> = bond_table.clamp_record().into_iter().collect();

    let tension_bars = select_bars(ast_required_mm2, clear_width, options);
    if tension_bars.is_none() {
        records.push(bars_do_not_fit("tension", ast_required_mm2, clear_width, options));
    }

    let compression_bars = if asc_required_mm2 > 0.0 {
        let bars = select_bars(asc_required_mm2, clear_width, options);
        if bars.is_none() {
            records.push(bars_do_not_fit("compression", asc_required_mm2, clear_width, options));
        }
        bars
    } else {
        None
    };

    let anchorage_for = |bars: &Option<BarArrangement>| {
        bars.as_ref()
            .map(|b| anchorage_lengths(b.largest_diameter_mm(), grades, options.bar_surface, options.splice))
    };
    let tension_anchorage = anchorage_for(&tension_bars);
    let compression_anchorage = anchorage_for(&compression_bars);

    let side_face = side_face_reinforcement(section);
    if let Some(sf) = &side_face {
        records.push(
            ErrorRecord::new(
                DesignErrorCode::SideFaceReinforcementRequired,
                Severity::Info,
                format!(
                    "Overall depth {:.0} mm exceeds {:.0} mm; provide {:.0} mm² on each side face",
                    section.overall_depth(),
                    SIDE_FACE_DEPTH_LIMIT_MM,
                    sf.area_per_face_mm2
                ),
                clause::SIDE_FACE_STEEL,
            )
            .with_suggestion("Space side-face bars at no more than 300 mm or the web thickness"),
        );
    }

    debug!(
        tension = ?tension_bars.as_ref().map(|b| b.description()),
        compression = ?compression_bars.as_ref().map(|b| b.description()),
        "detailing resolved"
    );

    Ok(DetailingResult {
        tension_bars,
        compression_bars,
        tension_anchorage,
        compression_anchorage,
        side_face,
        clear_width_mm: clear_width,
        bar_surface: options.bar_surface,
        splice: options.splice,
        status: worst_status(&records),
        records,
        table_lookups: vec![bond_table],
    })
}
