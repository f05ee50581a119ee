//! Validation for cross-references and numeric ranges between content definitions.

use super::data::*;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for checking an index lies inside a table
macro_rules! check_index {
    ($errors:expr, $len:expr, $source_type:expr, $source_id:expr, $field:expr, $index:expr) => {
        if $index >= $len {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!("index {} out of range (len {})", $index, $len),
            });
        }
    };
}

/// Helper macro for checking `min <= max`
macro_rules! check_range {
    ($errors:expr, $min:expr, $max:expr, $source_type:expr, $source_id:expr, $field:expr) => {
        if $min > $max {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!("min {} is greater than max {}", $min, $max),
            });
        }
    };
}

/// Validate all cross-references in the registry.
/// Returns a list of validation errors, empty if everything is consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let cycle = &registry.level.platform_cycle;
    let point_count = cycle.points.len();
    let group_count = cycle.groups.len();

    if registry.waves.is_empty() {
        errors.push(ValidationError {
            source_type: "Waves",
            source_id: "waves.ron".to_string(),
            field: "items",
            message: "no waves defined".to_string(),
        });
    }

    // Platform cycle
    if point_count == 0 {
        errors.push(ValidationError {
            source_type: "PlatformCycle",
            source_id: "level".to_string(),
            field: "points",
            message: "no spawn points defined".to_string(),
        });
    }
    if cycle.kinds.is_empty() {
        errors.push(ValidationError {
            source_type: "PlatformCycle",
            source_id: "level".to_string(),
            field: "kinds",
            message: "no platform kinds defined".to_string(),
        });
    }

    for group in &cycle.groups {
        for &index in &group.points {
            check_index!(errors, point_count, "PlatformGroup", group.name, "points", index);
        }
    }

    if let Some(default_group) = cycle.default_group {
        check_index!(
            errors,
            group_count,
            "PlatformCycle",
            "level",
            "default_group",
            default_group
        );
    }

    for rule in &cycle.kind_rules {
        if registry.platform_kind(&rule.kind).is_none() {
            errors.push(ValidationError {
                source_type: "KindRule",
                source_id: rule.kind.clone(),
                field: "kind",
                message: "references missing platform kind".to_string(),
            });
        }
        for &group in &rule.allowed_groups {
            check_index!(errors, group_count, "KindRule", rule.kind, "allowed_groups", group);
        }
    }

    for &index in &cycle.initial_only_points {
        check_index!(
            errors,
            point_count,
            "PlatformCycle",
            "level",
            "initial_only_points",
            index
        );
    }

    if let Some((a, b)) = cycle.fixed_initial {
        check_index!(errors, point_count, "PlatformCycle", "level", "fixed_initial", a);
        check_index!(errors, point_count, "PlatformCycle", "level", "fixed_initial", b);
    }

    for (field, rules) in [
        ("exclusion_rules", &cycle.exclusion_rules),
        ("occupancy_rules", &cycle.occupancy_rules),
    ] {
        for rule in rules {
            let id = format!("{}", rule.source);
            check_index!(errors, point_count, "PointRule", id, field, rule.source);
            for &index in &rule.exclude {
                check_index!(errors, point_count, "PointRule", id, field, index);
            }
        }
    }

    // Spawners
    for spawner in &registry.level.spawners {
        check_range!(
            errors,
            spawner.min_count,
            spawner.max_count,
            "Spawner",
            spawner.id,
            "count"
        );
        check_range!(
            errors,
            spawner.min_interval,
            spawner.max_interval,
            "Spawner",
            spawner.id,
            "interval"
        );
        let (min, max) = spawner_axis_range(spawner);
        if (max - min).abs() < f32::EPSILON {
            errors.push(ValidationError {
                source_type: "Spawner",
                source_id: spawner.id.clone(),
                field: "bounds",
                message: "spawn range along the spawner axis is zero".to_string(),
            });
        }
    }

    for (field, kind) in [
        ("static_platform_kind", &registry.level.static_platform_kind),
        ("start_platform_kind", &registry.level.start_platform_kind),
    ] {
        if registry.platform_kind(kind).is_none() {
            errors.push(ValidationError {
                source_type: "Level",
                source_id: "level".to_string(),
                field,
                message: format!("references missing platform kind '{}'", kind),
            });
        }
    }

    if cycle.no_candidate_policy == NoCandidatePolicy::WaitForFree
        && cycle.wait_for_free_timeout <= 0.0
    {
        errors.push(ValidationError {
            source_type: "PlatformCycle",
            source_id: "level".to_string(),
            field: "wait_for_free_timeout",
            message: "WaitForFree without a timeout can stall the cycle forever".to_string(),
        });
    }

    let rail = &registry.level.rail;
    if let Some(pattern) = rail.pattern {
        if !matches!(pattern, PatternDef::Sweeping | PatternDef::Stationed) {
            errors.push(ValidationError {
                source_type: "Rail",
                source_id: "level".to_string(),
                field: "pattern",
                message: format!("{:?} is not a shooter pattern", pattern),
            });
        }
    }
    if rail.points.is_empty() {
        errors.push(ValidationError {
            source_type: "Rail",
            source_id: "level".to_string(),
            field: "points",
            message: "no rail points defined, rail spawner stays idle".to_string(),
        });
    }
    check_range!(errors, rail.min_time, rail.max_time, "Rail", "level", "time");

    // Waves
    for wave in &registry.waves {
        let timing = &wave.platform_timing;
        check_range!(
            errors,
            timing.min_interval,
            timing.max_interval,
            "Wave",
            wave.id,
            "platform_timing"
        );
        check_range!(
            errors,
            wave.rail_min_time,
            wave.rail_max_time,
            "Wave",
            wave.id,
            "rail_time"
        );
        for entry in &wave.spawners {
            if registry.spawner(&entry.spawner).is_none() {
                errors.push(ValidationError {
                    source_type: "Wave",
                    source_id: wave.id.clone(),
                    field: "spawners",
                    message: format!("references missing spawner '{}'", entry.spawner),
                });
            }
            check_range!(
                errors,
                entry.min_count,
                entry.max_count,
                "Wave",
                wave.id,
                "spawners.count"
            );
            check_range!(
                errors,
                entry.min_interval,
                entry.max_interval,
                "Wave",
                wave.id,
                "spawners.interval"
            );
        }
    }

    errors
}

/// Jittered `(min, max)` ranges on both axes spanned by a spawner's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRanges {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

pub fn spawner_ranges(spawner: &SpawnerDef) -> SpawnRanges {
    let jittered = |a: f32, b: f32| {
        let a = a + spawner.jitter_positive;
        let b = b + spawner.jitter_negative;
        (a.min(b), a.max(b))
    };
    SpawnRanges {
        x: jittered(spawner.bound_a.0, spawner.bound_b.0),
        y: jittered(spawner.bound_a.1, spawner.bound_b.1),
    }
}

/// Spawn range along the randomized axis: y for side spawners, x for top spawners.
pub fn spawner_axis_range(spawner: &SpawnerDef) -> (f32, f32) {
    let ranges = spawner_ranges(spawner);
    match spawner.mode {
        ApproachMode::Side => ranges.y,
        ApproachMode::Top => ranges.x,
    }
}
