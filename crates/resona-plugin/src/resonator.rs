//! Parameter table of the resonator effect.
//!
//! Ids are part of the persisted state layout: never renumber or remove
//! one, only append.

use resona_core::{
    ParamFlags, ParamId, ParamSpec, ParamTable, ParamUnit, TableError, TableOptions,
};

/// Current state format version.
pub const STATE_VERSION: u64 = 0;

/// Highest resonator dimension.
pub const MAX_DIMENSION: usize = 10;

/// Highest resonator order.
pub const MAX_ORDER: i64 = 200;

/// Parameter ids.
pub mod ids {
    use resona_core::ParamId;

    /// Master volume.
    pub const VOL: ParamId = ParamId(0);
    /// Dry/wet mix.
    pub const MIX: ParamId = ParamId(1);
    /// Resonator model.
    pub const RESONATOR_TYPE: ParamId = ParamId(2);
    /// Resonator dimension.
    pub const RESONATOR_DIM: ParamId = ParamId(3);
    /// Resonator order.
    pub const RESONATOR_ORDER: ParamId = ParamId(4);
    /// Resonator frequency.
    pub const RESONATOR_FREQ: ParamId = ParamId(5);
    /// Resonator damping.
    pub const RESONATOR_DAMP: ParamId = ParamId(6);
    /// Sonic velocity.
    pub const RESONATOR_VEL: ParamId = ParamId(7);
    /// Low-cut frequency.
    pub const LC_FREQ: ParamId = ParamId(8);
    /// Low-cut Q.
    pub const LC_Q: ParamId = ParamId(9);
    /// High-cut frequency.
    pub const HC_FREQ: ParamId = ParamId(10);
    /// High-cut Q.
    pub const HC_Q: ParamId = ParamId(11);
    /// First left input position.
    pub const IN_L0: ParamId = ParamId(12);
    /// First right input position.
    pub const IN_R0: ParamId = ParamId(22);
    /// First left output position.
    pub const OUT_L0: ParamId = ParamId(32);
    /// First right output position.
    pub const OUT_R0: ParamId = ParamId(42);
    /// Left input position curve.
    pub const IN_POS_CURVE_L: ParamId = ParamId(52);
    /// Right input position curve.
    pub const IN_POS_CURVE_R: ParamId = ParamId(53);
    /// Left output position curve.
    pub const OUT_POS_CURVE_L: ParamId = ParamId(54);
    /// Right output position curve.
    pub const OUT_POS_CURVE_R: ParamId = ParamId(55);
    /// Link input curves.
    pub const LINK_IN_POS_CURVES: ParamId = ParamId(56);
    /// Link output curves.
    pub const LINK_OUT_POS_CURVES: ParamId = ParamId(57);
    /// Output level meter (read-only).
    pub const VU_PPM: ParamId = ParamId(58);
    /// Processing time meter (read-only).
    pub const PROCESS_TIME: ParamId = ParamId(59);
}

/// Number of declared parameters.
pub const PARAM_COUNT: usize = 60;

const LINK_LABELS: &[&str] = &["Not Linked", "Linked"];

/// Name, short name and string id of each position parameter, per bank.
type PositionBank = [(&'static str, &'static str, &'static str); MAX_DIMENSION];

const IN_L: PositionBank = [
    ("Left X0", "L X0", "in_l0"),
    ("Left X1", "L X1", "in_l1"),
    ("Left X2", "L X2", "in_l2"),
    ("Left X3", "L X3", "in_l3"),
    ("Left X4", "L X4", "in_l4"),
    ("Left X5", "L X5", "in_l5"),
    ("Left X6", "L X6", "in_l6"),
    ("Left X7", "L X7", "in_l7"),
    ("Left X8", "L X8", "in_l8"),
    ("Left X9", "L X9", "in_l9"),
];

const IN_R: PositionBank = [
    ("Right X0", "R X0", "in_r0"),
    ("Right X1", "R X1", "in_r1"),
    ("Right X2", "R X2", "in_r2"),
    ("Right X3", "R X3", "in_r3"),
    ("Right X4", "R X4", "in_r4"),
    ("Right X5", "R X5", "in_r5"),
    ("Right X6", "R X6", "in_r6"),
    ("Right X7", "R X7", "in_r7"),
    ("Right X8", "R X8", "in_r8"),
    ("Right X9", "R X9", "in_r9"),
];

const OUT_L: PositionBank = [
    ("Left Y0", "L Y0", "out_l0"),
    ("Left Y1", "L Y1", "out_l1"),
    ("Left Y2", "L Y2", "out_l2"),
    ("Left Y3", "L Y3", "out_l3"),
    ("Left Y4", "L Y4", "out_l4"),
    ("Left Y5", "L Y5", "out_l5"),
    ("Left Y6", "L Y6", "out_l6"),
    ("Left Y7", "L Y7", "out_l7"),
    ("Left Y8", "L Y8", "out_l8"),
    ("Left Y9", "L Y9", "out_l9"),
];

const OUT_R: PositionBank = [
    ("Right Y0", "R Y0", "out_r0"),
    ("Right Y1", "R Y1", "out_r1"),
    ("Right Y2", "R Y2", "out_r2"),
    ("Right Y3", "R Y3", "out_r3"),
    ("Right Y4", "R Y4", "out_r4"),
    ("Right Y5", "R Y5", "out_r5"),
    ("Right Y6", "R Y6", "out_r6"),
    ("Right Y7", "R Y7", "out_r7"),
    ("Right Y8", "R Y8", "out_r8"),
    ("Right Y9", "R Y9", "out_r9"),
];

/// All resonator specs in id order.
pub fn resonator_specs() -> Vec<ParamSpec> {
    use ids::*;

    let mut specs = Vec::with_capacity(PARAM_COUNT);
    specs.extend([
        ParamSpec::linear(VOL, "Master Volume", "MVol", 0.0, 1.0, 0.8)
            .with_string_id("vol")
            .with_precision(2),
        ParamSpec::linear(MIX, "Mix", "Mix", 0.0, 100.0, 100.0)
            .with_string_id("mix")
            .with_unit(ParamUnit::Percent)
            .with_precision(0),
        ParamSpec::discrete(RESONATOR_TYPE, "Resonator Type", "Res Type", 1, 2, 1)
            .with_string_id("res_type"),
        ParamSpec::discrete(RESONATOR_DIM, "Resonator Dimension", "Res Dim", 1, MAX_DIMENSION as i64, 4)
            .with_string_id("res_dim")
            .with_initial(3.0),
        ParamSpec::discrete(RESONATOR_ORDER, "Resonator Order", "Res Order", 1, MAX_ORDER, 5)
            .with_string_id("res_order")
            .with_initial(128.0),
        ParamSpec::log(RESONATOR_FREQ, "Resonator Frequency", "Res Freq", 20.0, 15000.0, 500.0)
            .with_string_id("res_freq")
            .with_unit(ParamUnit::Hertz)
            .with_initial(200.0),
        ParamSpec::log(RESONATOR_DAMP, "Resonator Dampening", "Res Damp", 0.01, 10.0, 1.0)
            .with_string_id("res_damp")
            .with_precision(2)
            .with_initial(2.3),
        ParamSpec::linear(RESONATOR_VEL, "Sonic Velocity", "Sonic Vel", 0.1, 1000.0, 10.0)
            .with_string_id("res_vel")
            .with_unit(ParamUnit::MetersPerSecond),
        ParamSpec::log(LC_FREQ, "Low Cut Frequency", "LC Freq", 20.0, 5000.0, 200.0)
            .with_string_id("lc_freq")
            .with_unit(ParamUnit::Hertz)
            .with_precision(0)
            .with_initial(650.0),
        ParamSpec::linear(LC_Q, "Low Cut Q", "LC Q", 1.0, 8.0, 1.0).with_string_id("lc_q"),
        ParamSpec::log(HC_FREQ, "High Cut Frequency", "HC Freq", 100.0, 18000.0, 18000.0)
            .with_string_id("hc_freq")
            .with_unit(ParamUnit::Hertz)
            .with_precision(0),
        ParamSpec::linear(HC_Q, "High Cut Q", "HC Q", 1.0, 8.0, 1.0).with_string_id("hc_q"),
    ]);

    for (first, bank) in [(IN_L0, IN_L), (IN_R0, IN_R), (OUT_L0, OUT_L), (OUT_R0, OUT_R)] {
        for (offset, (name, short_name, string_id)) in bank.into_iter().enumerate() {
            specs.push(
                ParamSpec::linear(ParamId(first.0 + offset as u32), name, short_name, 0.0, 1.0, 0.5)
                    .with_string_id(string_id)
                    .with_precision(2),
            );
        }
    }

    specs.extend([
        position_curve(IN_POS_CURVE_L, "Input Pos Curve L", "InPos L", "in_pos_curve_l"),
        position_curve(IN_POS_CURVE_R, "Input Pos Curve R", "InPos R", "in_pos_curve_r"),
        position_curve(OUT_POS_CURVE_L, "Output Pos Curve L", "OutPos L", "out_pos_curve_l"),
        position_curve(OUT_POS_CURVE_R, "Output Pos Curve R", "OutPos R", "out_pos_curve_r"),
        ParamSpec::string_list(LINK_IN_POS_CURVES, "Link In Pos Curves", "Link In C", LINK_LABELS, 0)
            .with_string_id("link_in_pos_curves")
            .with_flags(ParamFlags::NONE),
        ParamSpec::string_list(LINK_OUT_POS_CURVES, "Link Out Pos Curves", "Link Out C", LINK_LABELS, 0)
            .with_string_id("link_out_pos_curves")
            .with_flags(ParamFlags::NONE),
        ParamSpec::linear(VU_PPM, "Output Level", "Level", 0.0, 1.0, 0.0)
            .with_string_id("vu_ppm")
            .with_precision(2)
            .read_only(),
        ParamSpec::linear(PROCESS_TIME, "Process Time", "T", 0.0, 10.0, 0.0)
            .with_string_id("process_time")
            .with_precision(6)
            .read_only(),
    ]);

    specs
}

fn position_curve(
    id: ParamId,
    name: &'static str,
    short_name: &'static str,
    string_id: &'static str,
) -> ParamSpec {
    ParamSpec::linear(id, name, short_name, -1.0, 1.0, 0.0)
        .with_string_id(string_id)
        .with_precision(3)
}

/// Builds the validated resonator table.
pub fn resonator_table() -> Result<ParamTable, TableError> {
    ParamTable::new(
        resonator_specs(),
        TableOptions {
            state_version: STATE_VERSION,
            has_bypass: true,
        },
    )
}
