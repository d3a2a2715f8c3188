// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! The desks this binary knows about.
//!
//! Monitor rules identify specific panels; scenarios pair a required set
//! of them with a layout, most specific first. Both tables are plain data.
//! To teach the tool a new desk, add a rule for each panel and a scenario
//! above the fallbacks.

use sway_scenes::{Entry, Error, ModeSpec, MonitorRule, Scenario, Template};

pub const LAPTOP: &str = "laptop_builtin";
pub const DESK_CENTER: &str = "desk_center";
pub const DESK_LEFT: &str = "desk_left";
pub const DESK_RIGHT: &str = "desk_right";
pub const DLR_LEFT: &str = "dlr_left";
pub const DLR_RIGHT: &str = "dlr_right";

/// Identity rules for every panel the scenarios refer to.
///
/// # Errors
///
/// Returns error if a pattern fails to compile.
pub fn monitor_rules() -> Result<Vec<MonitorRule>, Error> {
    Ok(vec![
        MonitorRule::new(LAPTOP).name("eDP-1")?,
        MonitorRule::new(DESK_CENTER)
            .model("27GL650F")?
            .make("LG Electronics")?,
        MonitorRule::new(DESK_LEFT)
            .model("LEN LT2452pwC")?
            .make("Lenovo Group Limited")?,
        MonitorRule::new(DESK_RIGHT)
            .model("S242HL")?
            .make("Acer Technologies")?,
        MonitorRule::new(DLR_LEFT).make("Dell Inc.")?.name("DP-9")?,
        MonitorRule::new(DLR_RIGHT).make("Dell Inc.")?.name("DP-7")?,
    ])
}

const HOME_DESK: &[Entry] = &[
    Entry::place(DESK_CENTER, ModeSpec::new(1920, 1080, 144_001), 1920, 0),
    Entry::place(DESK_RIGHT, ModeSpec::new(1920, 1080, 60_000), 3840, 0),
    Entry::place(DESK_LEFT, ModeSpec::new(1920, 1200, 59_950), 0, 0),
    Entry::disable(LAPTOP),
];

const DLR_DESK: &[Entry] = &[
    Entry::place(LAPTOP, ModeSpec::new(1920, 1200, 60_001), 1568, 1440),
    Entry::place(DLR_RIGHT, ModeSpec::new(2560, 1440, 59_951), 2560, 0),
    Entry::place(DLR_LEFT, ModeSpec::new(2560, 1440, 59_951), 0, 0),
];

const LAPTOP_WITH_SCREEN_ABOVE: &[Entry] = &[
    Entry::place(LAPTOP, ModeSpec::new(1920, 1200, 60_001), 0, 1080),
    Entry::place(DESK_CENTER, ModeSpec::new(1920, 1080, 144_001), 0, 0),
];

/// Most specific first. The last scenario requires nothing, so selection
/// always lands somewhere, even with zero outputs.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "Home desk setup",
        requires: &[LAPTOP, DESK_LEFT, DESK_CENTER, DESK_RIGHT],
        template: Template::Fixed(HOME_DESK),
    },
    Scenario {
        name: "DLR desk setup",
        requires: &[LAPTOP, DLR_LEFT, DLR_RIGHT],
        template: Template::Fixed(DLR_DESK),
    },
    Scenario {
        name: "Laptop with screen above setup",
        requires: &[LAPTOP, DESK_CENTER],
        template: Template::Fixed(LAPTOP_WITH_SCREEN_ABOVE),
    },
    Scenario {
        name: "Fallback laptop setup",
        requires: &[LAPTOP],
        template: Template::AutoRow {
            leading: Some(LAPTOP),
        },
    },
    Scenario {
        name: "Fallback desk setup",
        requires: &[],
        template: Template::AutoRow { leading: None },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use sway_scenes::shell::{Mode, Output};
    use sway_scenes::{detect, flatten, select, Action, DirectiveKind};

    fn output(name: &str, make: &str, model: &str, width: u32, height: u32) -> Output {
        Output {
            name: name.to_owned(),
            make: make.to_owned(),
            model: model.to_owned(),
            serial: "Unknown".to_owned(),
            active: true,
            modes: vec![Mode {
                width,
                height,
                refresh: 60_000,
            }],
            ..Output::default()
        }
    }

    fn laptop() -> Output {
        output("eDP-1", "BOE", "0x0964", 1920, 1200)
    }

    #[test]
    fn every_scenario_requires_the_monitors_it_uses() {
        for scenario in SCENARIOS {
            match scenario.template {
                Template::Fixed(entries) => {
                    for entry in entries {
                        assert!(
                            scenario.requires.contains(&entry.monitor),
                            "`{}` places `{}` without requiring it",
                            scenario.name,
                            entry.monitor
                        );
                    }
                }
                Template::AutoRow { leading } => {
                    if let Some(label) = leading {
                        assert!(
                            scenario.requires.contains(&label),
                            "`{}` leads with `{}` without requiring it",
                            scenario.name,
                            label
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn every_required_monitor_has_a_rule() {
        let rules = monitor_rules().unwrap();

        for scenario in SCENARIOS {
            for label in scenario.requires {
                assert!(
                    rules.iter().any(|rule| rule.label() == *label),
                    "`{}` requires unknown monitor `{label}`",
                    scenario.name
                );
            }
        }
    }

    #[test]
    fn laptop_and_center_screen_select_the_stacked_setup() {
        let outputs = [
            laptop(),
            output("DP-1", "LG Electronics", "27GL650F", 1920, 1080),
        ];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "Laptop with screen above setup");

        let layout = scenario.render(&matched, &outputs).unwrap();
        assert_eq!(layout.directives.len(), 2);

        assert_eq!(
            layout.command(),
            "output \"eDP-1\" mode 1920x1200@60.001Hz pos 0 1080 transform normal \
             scale 1.0 scale_filter nearest adaptive_sync off dpms on, \
             output \"DP-1\" mode 1920x1080@144.001Hz pos 0 0 transform normal \
             scale 1.0 scale_filter nearest adaptive_sync off dpms on"
        );
    }

    #[test]
    fn the_full_home_desk_beats_the_stacked_setup() {
        let outputs = [
            laptop(),
            output("DP-1", "LG Electronics", "27GL650F", 1920, 1080),
            output("DVI-I-1", "Lenovo Group Limited", "LEN LT2452pwC", 1920, 1200),
            output("HDMI-A-1", "Acer Technologies", "S242HL", 1920, 1080),
        ];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "Home desk setup");

        let layout = scenario.render(&matched, &outputs).unwrap();

        // Entry order, not enumeration order: center, right, left, laptop.
        let names: Vec<&str> = layout
            .directives
            .iter()
            .map(|directive| directive.name.as_str())
            .collect();
        assert_eq!(names, ["DP-1", "HDMI-A-1", "DVI-I-1", "eDP-1"]);

        assert_eq!(layout.directives[3].kind, DirectiveKind::Disable);
    }

    #[test]
    fn the_dlr_desk_is_identified_by_port_and_make() {
        let outputs = [
            laptop(),
            output("DP-7", "Dell Inc.", "DELL U2515H", 2560, 1440),
            output("DP-9", "Dell Inc.", "DELL U2515H", 2560, 1440),
        ];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "DLR desk setup");

        let layout = scenario.render(&matched, &outputs).unwrap();
        assert_eq!(layout.directives[0].name, "eDP-1");
        assert_eq!(layout.directives[1].name, "DP-7");
        assert_eq!(layout.directives[2].name, "DP-9");
    }

    #[test]
    fn a_lone_laptop_falls_back_to_the_auto_row() {
        let outputs = [laptop(), output("HDMI-A-1", "Goldstar", "TV", 3840, 2160)];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "Fallback laptop setup");

        let layout = scenario.render(&matched, &outputs).unwrap();

        // The builtin panel leads the row and its width offsets the rest.
        assert_eq!(layout.directives[0].name, "eDP-1");

        let DirectiveKind::Configure(settings) = &layout.directives[1].kind else {
            panic!("expected configure");
        };
        assert_eq!(settings.position, (1920, 0));
    }

    #[test]
    fn unknown_desks_fall_back_to_enumeration_order() {
        let outputs = [
            output("DP-3", "Goldstar", "TV", 1920, 1080),
            output("DP-4", "Goldstar", "TV", 1920, 1080),
        ];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "Fallback desk setup");

        let layout = scenario.render(&matched, &outputs).unwrap();
        let names: Vec<&str> = layout
            .directives
            .iter()
            .map(|directive| directive.name.as_str())
            .collect();
        assert_eq!(names, ["DP-3", "DP-4"]);
    }

    #[test]
    fn zero_outputs_render_an_empty_layout() {
        let matched = detect(&monitor_rules().unwrap(), &[]);
        let scenario = select(SCENARIOS, &matched).unwrap();

        assert_eq!(scenario.name, "Fallback desk setup");
        assert_eq!(scenario.render(&matched, &[]).unwrap().command(), "");
    }

    #[test]
    fn block_rendering_and_batch_command_agree() {
        let outputs = [
            laptop(),
            output("DP-1", "LG Electronics", "27GL650F", 1920, 1080),
        ];

        let matched = detect(&monitor_rules().unwrap(), &outputs);
        let scenario = select(SCENARIOS, &matched).unwrap();
        let layout = scenario.render(&matched, &outputs).unwrap();

        assert_eq!(flatten(&layout.to_string()), layout.command());
    }

    #[test]
    fn home_desk_placements_match_the_curated_values() {
        let Template::Fixed(entries) = SCENARIOS[0].template else {
            panic!("expected fixed template");
        };

        let Action::Place(center) = entries[0].action else {
            panic!("expected placement");
        };
        assert_eq!(center.mode, ModeSpec::new(1920, 1080, 144_001));
        assert_eq!(center.position, (1920, 0));

        let Action::Place(left) = entries[2].action else {
            panic!("expected placement");
        };
        assert_eq!(left.mode, ModeSpec::new(1920, 1200, 59_950));
        assert_eq!(left.position, (0, 0));
    }
}
