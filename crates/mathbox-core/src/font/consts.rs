//! OpenType MATH constants.

use serde::{Deserialize, Serialize};

/// The MATH table constants, in font design units, in table order.
///
/// Percentages (`script_percent_scale_down`, `script_script_percent_scale_down`,
/// `radical_degree_bottom_raise_percent`) are plain integers. The default is
/// the Latin Modern Math table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConsts {
    pub script_percent_scale_down: i16,
    pub script_script_percent_scale_down: i16,
    pub delimited_sub_formula_min_height: i16,
    pub display_operator_min_height: i16,
    pub math_leading: i16,
    pub axis_height: i16,
    pub accent_base_height: i16,
    pub flattened_accent_base_height: i16,
    pub subscript_shift_down: i16,
    pub subscript_top_max: i16,
    pub subscript_baseline_drop_min: i16,
    pub superscript_shift_up: i16,
    pub superscript_shift_up_cramped: i16,
    pub superscript_bottom_min: i16,
    pub superscript_baseline_drop_max: i16,
    pub sub_superscript_gap_min: i16,
    pub superscript_bottom_max_with_subscript: i16,
    pub space_after_script: i16,
    pub upper_limit_gap_min: i16,
    pub upper_limit_baseline_rise_min: i16,
    pub lower_limit_gap_min: i16,
    pub lower_limit_baseline_drop_min: i16,
    pub stack_top_shift_up: i16,
    pub stack_top_display_style_shift_up: i16,
    pub stack_bottom_shift_down: i16,
    pub stack_bottom_display_style_shift_down: i16,
    pub stack_gap_min: i16,
    pub stack_display_style_gap_min: i16,
    pub stretch_stack_top_shift_up: i16,
    pub stretch_stack_bottom_shift_down: i16,
    pub stretch_stack_gap_above_min: i16,
    pub stretch_stack_gap_below_min: i16,
    pub fraction_numerator_shift_up: i16,
    pub fraction_numerator_display_style_shift_up: i16,
    pub fraction_denominator_shift_down: i16,
    pub fraction_denominator_display_style_shift_down: i16,
    pub fraction_numerator_gap_min: i16,
    pub fraction_num_display_style_gap_min: i16,
    pub fraction_rule_thickness: i16,
    pub fraction_denominator_gap_min: i16,
    pub fraction_denom_display_style_gap_min: i16,
    pub skewed_fraction_horizontal_gap: i16,
    pub skewed_fraction_vertical_gap: i16,
    pub overbar_vertical_gap: i16,
    pub overbar_rule_thickness: i16,
    pub overbar_extra_ascender: i16,
    pub underbar_vertical_gap: i16,
    pub underbar_rule_thickness: i16,
    pub underbar_extra_descender: i16,
    pub radical_vertical_gap: i16,
    pub radical_display_style_vertical_gap: i16,
    pub radical_rule_thickness: i16,
    pub radical_extra_ascender: i16,
    pub radical_kern_before_degree: i16,
    pub radical_kern_after_degree: i16,
    pub radical_degree_bottom_raise_percent: i16,
    pub min_connector_overlap: i16,
}

impl Default for MathConsts {
    fn default() -> Self {
        Self {
            script_percent_scale_down: 70,
            script_script_percent_scale_down: 50,
            delimited_sub_formula_min_height: 1300,
            display_operator_min_height: 1300,
            math_leading: 154,
            axis_height: 250,
            accent_base_height: 450,
            flattened_accent_base_height: 664,
            subscript_shift_down: 247,
            subscript_top_max: 344,
            subscript_baseline_drop_min: 200,
            superscript_shift_up: 363,
            superscript_shift_up_cramped: 289,
            superscript_bottom_min: 108,
            superscript_baseline_drop_max: 250,
            sub_superscript_gap_min: 160,
            superscript_bottom_max_with_subscript: 344,
            space_after_script: 56,
            upper_limit_gap_min: 200,
            upper_limit_baseline_rise_min: 111,
            lower_limit_gap_min: 167,
            lower_limit_baseline_drop_min: 600,
            stack_top_shift_up: 444,
            stack_top_display_style_shift_up: 677,
            stack_bottom_shift_down: 345,
            stack_bottom_display_style_shift_down: 686,
            stack_gap_min: 120,
            stack_display_style_gap_min: 280,
            stretch_stack_top_shift_up: 111,
            stretch_stack_bottom_shift_down: 600,
            stretch_stack_gap_above_min: 200,
            stretch_stack_gap_below_min: 167,
            fraction_numerator_shift_up: 394,
            fraction_numerator_display_style_shift_up: 677,
            fraction_denominator_shift_down: 345,
            fraction_denominator_display_style_shift_down: 686,
            fraction_numerator_gap_min: 40,
            fraction_num_display_style_gap_min: 120,
            fraction_rule_thickness: 40,
            fraction_denominator_gap_min: 40,
            fraction_denom_display_style_gap_min: 120,
            skewed_fraction_horizontal_gap: 350,
            skewed_fraction_vertical_gap: 96,
            overbar_vertical_gap: 120,
            overbar_rule_thickness: 40,
            overbar_extra_ascender: 40,
            underbar_vertical_gap: 120,
            underbar_rule_thickness: 40,
            underbar_extra_descender: 40,
            radical_vertical_gap: 50,
            radical_display_style_vertical_gap: 148,
            radical_rule_thickness: 40,
            radical_extra_ascender: 40,
            radical_kern_before_degree: 278,
            radical_kern_after_degree: -556,
            radical_degree_bottom_raise_percent: 60,
            min_connector_overlap: 20,
        }
    }
}
