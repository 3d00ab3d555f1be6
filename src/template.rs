//! Read-only catalog of predefined layout templates.
//!
//! Each template supplies a document title/citation default and an ordered
//! list of section defaults. The section count of a template is fixed; the
//! content binder never adds sections beyond it.

use crate::geometry::SectionRect;
use crate::section::{ChartPoint, Section, SectionLayout};

pub const DEFAULT_TEMPLATE: &str = "clinical-trial";

/// A named starting arrangement of section defaults.
#[derive(Debug, Clone)]
pub struct LayoutTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub title: &'static str,
    pub citation: &'static str,
    pub sections: Vec<Section>,
}

pub fn template_ids() -> &'static [&'static str] {
    &[
        "clinical-trial",
        "meta-analysis",
        "longitudinal-study",
        "comparative-study",
        "cycle-process",
        "blank-canvas",
    ]
}

/// The template used when no id, or an unknown id, is given.
pub fn default_template() -> LayoutTemplate {
    clinical_trial()
}

/// Look up a template by id. Returns `None` for unknown ids; callers that
/// need a guaranteed template fall back to [`default_template`].
pub fn template(id: &str) -> Option<LayoutTemplate> {
    match id {
        "clinical-trial" => Some(clinical_trial()),
        "meta-analysis" => Some(meta_analysis()),
        "longitudinal-study" => Some(longitudinal_study()),
        "comparative-study" => Some(comparative_study()),
        "cycle-process" => Some(cycle_process()),
        "blank-canvas" => Some(blank_canvas()),
        _ => None,
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> SectionRect {
    SectionRect::new(x, y, w, h)
}

// 4 + 1 layout: 2x2 left grid plus one tall right column.
fn clinical_trial() -> LayoutTemplate {
    LayoutTemplate {
        id: "clinical-trial",
        name: "Clinical Trial",
        description: "4-panel horizontal flow",
        title: "Transepidermal Water Loss in Oral Food Challenges in Children With Peanut Allergy",
        citation: "Freigeh GE et al. JAMA Netw Open. 2025;8(11):e2543371.",
        sections: vec![
            Section::new(
                "population",
                "POPULATION",
                "40 Children with history of peanut reaction undergoing oral food challenge (OFC). Mean age, 31.8 mos.",
                rect(50.0, 160.0, 380.0, 255.0),
            )
            .with_icon("group")
            .with_layout(SectionLayout::Right),
            Section::new(
                "intervention",
                "INTERVENTION",
                "Peanut OFC with stopping rules based on a 1 g/m\u{b2}/h rise in TEWL plus one objective symptom.",
                rect(450.0, 160.0, 380.0, 255.0),
            )
            .with_icon("healing"),
            Section::new(
                "findings",
                "FINDINGS",
                "The TEWL group had significantly lower rates of anaphylaxis compared with the control group (P=.02).",
                rect(850.0, 160.0, 380.0, 530.0),
            )
            .with_icon("bar_chart")
            .with_image_scale(1.1)
            .with_layout(SectionLayout::Bottom),
            Section::new(
                "settings",
                "SETTINGS / LOCATIONS",
                "1 Academic medical center",
                rect(50.0, 435.0, 380.0, 255.0),
            )
            .with_icon("domain"),
            Section::new(
                "outcome",
                "PRIMARY OUTCOME",
                "Anaphylaxis rate defined as a Consortium of Food Allergy Research (CoFAR) score \u{2265}2.",
                rect(450.0, 435.0, 380.0, 255.0),
            )
            .with_icon("target"),
        ],
    }
}

// Three equal columns.
fn meta_analysis() -> LayoutTemplate {
    LayoutTemplate {
        id: "meta-analysis",
        name: "Meta-Analysis",
        description: "3-column vertical comparison",
        title: "Efficacy of Immunotherapy for Asthma: A Systematic Review",
        citation: "Smith J et al. JAMA. 2024;331(15):1234-1245.",
        sections: vec![
            Section::new(
                "sources",
                "DATA SOURCES",
                "MEDLINE, Embase, and the Cochrane Central Register of Controlled Trials from inception to January 2024.",
                rect(140.0, 160.0, 320.0, 500.0),
            )
            .with_icon("folder_open"),
            Section::new(
                "methods",
                "STUDY SELECTION",
                "Randomized clinical trials comparing immunotherapy with placebo in pediatric asthma patients.",
                rect(480.0, 160.0, 320.0, 500.0),
            )
            .with_icon("filter_list"),
            Section::new(
                "synthesis",
                "DATA SYNTHESIS",
                "64 studies (N=4500). Subcutaneous immunotherapy significantly reduced asthma symptoms (SMD -0.45; 95% CI -0.6 to -0.3).",
                rect(820.0, 160.0, 320.0, 500.0),
            )
            .with_icon("query_stats")
            .with_statistics("SMD -0.45"),
        ],
    }
}

// Three squares centered vertically in the safe area.
fn longitudinal_study() -> LayoutTemplate {
    LayoutTemplate {
        id: "longitudinal-study",
        name: "Longitudinal Study",
        description: "Timeline flow",
        title: "Longitudinal Trajectories of Cardiovascular Risk",
        citation: "Doe A et al. JAMA Cardiol. 2024;9(2):100-110.",
        sections: vec![
            Section::new(
                "baseline",
                "BASELINE (Year 0)",
                "1500 participants free of CVD. Mean age 45 years. 50% women.",
                rect(140.0, 265.0, 320.0, 320.0),
            )
            .with_icon("flag")
            .with_layout(SectionLayout::Left),
            Section::new(
                "followup",
                "FOLLOW-UP (Year 5)",
                "Assessment of blood pressure, lipids, and lifestyle factors.",
                rect(480.0, 265.0, 320.0, 320.0),
            )
            .with_icon("monitor_heart")
            .with_layout(SectionLayout::Left),
            Section::new(
                "outcome",
                "OUTCOME (Year 10)",
                "Elevated risk score associated with early hypertension onset (HR 1.5).",
                rect(820.0, 265.0, 320.0, 320.0),
            )
            .with_icon("clinical_notes")
            .with_statistics("HR 1.5")
            .with_layout(SectionLayout::Left),
        ],
    }
}

// 2x2 grid; the bottom row carries bar charts instead of icons.
fn comparative_study() -> LayoutTemplate {
    LayoutTemplate {
        id: "comparative-study",
        name: "Comparative Study",
        description: "2x2 grid matrix",
        title: "Drug A Versus Drug B in Hypertension",
        citation: "Trial Investigators. JAMA. 2024;330:500.",
        sections: vec![
            Section::new(
                "group-a",
                "GROUP A (New Drug)",
                "N=500. Received the new inhibitor at 10mg daily.",
                rect(160.0, 160.0, 460.0, 240.0),
            )
            .with_icon("pill")
            .with_layout(SectionLayout::Left),
            Section::new(
                "group-b",
                "GROUP B (Standard Care)",
                "N=500. Received standard ACE inhibitor therapy.",
                rect(660.0, 160.0, 460.0, 240.0),
            )
            .with_icon("vaccines")
            .with_layout(SectionLayout::Left),
            Section::new(
                "result-a",
                "RESULTS GROUP A",
                "Mean SBP reduction: 15 mmHg. Adverse events: 5%.",
                rect(160.0, 420.0, 460.0, 240.0),
            )
            .with_chart(vec![
                ChartPoint {
                    label: "Baseline".into(),
                    value: 140.0,
                },
                ChartPoint {
                    label: "End".into(),
                    value: 125.0,
                },
            ])
            .with_layout(SectionLayout::Right),
            Section::new(
                "result-b",
                "RESULTS GROUP B",
                "Mean SBP reduction: 12 mmHg. Adverse events: 8%.",
                rect(660.0, 420.0, 460.0, 240.0),
            )
            .with_chart(vec![
                ChartPoint {
                    label: "Baseline".into(),
                    value: 140.0,
                },
                ChartPoint {
                    label: "End".into(),
                    value: 128.0,
                },
            ])
            .with_layout(SectionLayout::Right),
        ],
    }
}

// Center square plus four surrounding boxes.
fn cycle_process() -> LayoutTemplate {
    LayoutTemplate {
        id: "cycle-process",
        name: "Cycle / Process",
        description: "Circular flow",
        title: "Cycle / Process Diagram",
        citation: "Author et al. Journal. 2024.",
        sections: vec![
            Section::new(
                "center",
                "CENTER",
                "The main focus of the process or the heart of the cycle.",
                rect(500.0, 285.0, 280.0, 280.0),
            )
            .with_icon("workspace_premium"),
            Section::new("step1", "STEP 1", "Preparation.", rect(160.0, 170.0, 280.0, 180.0))
                .with_icon("list_alt"),
            Section::new("step2", "STEP 2", "Execution.", rect(840.0, 170.0, 280.0, 180.0))
                .with_icon("construction"),
            Section::new("step3", "STEP 3", "Analysis.", rect(840.0, 500.0, 280.0, 180.0))
                .with_icon("insights"),
            Section::new("step4", "STEP 4", "Iteration.", rect(160.0, 500.0, 280.0, 180.0))
                .with_icon("autorenew"),
        ],
    }
}

fn blank_canvas() -> LayoutTemplate {
    LayoutTemplate {
        id: "blank-canvas",
        name: "Blank Canvas",
        description: "Start from scratch",
        title: "New Graphical Abstract Project",
        citation: "Author et al. Journal. 2024.",
        sections: vec![Section::new(
            "main",
            "START DESIGNING",
            "Click here to edit this section or use the toolbar to add new elements.",
            rect(140.0, 170.0, 1000.0, 500.0),
        )
        .with_icon("draw")],
    }
}
