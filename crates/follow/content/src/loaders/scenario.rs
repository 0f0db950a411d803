//! Scenario loader.

use std::path::Path;

use follow_core::LocationId;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{LocationLayout, Placement, Scenario};

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        validate(&scenario)?;
        Ok(scenario)
    }
}

fn validate(scenario: &Scenario) -> LoadResult<()> {
    anyhow::ensure!(
        !scenario.locations.is_empty(),
        "scenario defines no locations"
    );

    for (index, layout) in scenario.locations.iter().enumerate() {
        validate_layout(layout)?;
        anyhow::ensure!(
            !scenario.locations[..index]
                .iter()
                .any(|other| other.id == layout.id),
            "location {} is defined twice",
            layout.id
        );
    }

    validate_placement(scenario, "leader", &scenario.leader)?;
    validate_placement(scenario, "follower", &scenario.follower)?;

    for (index, waypoint) in scenario.route.iter().enumerate() {
        let layout = find_layout(scenario, &waypoint.location)?;
        anyhow::ensure!(
            layout.is_floor(waypoint.tile),
            "route waypoint {} at {:?} in {} is not a floor tile",
            index,
            waypoint.tile,
            waypoint.location
        );
    }
    Ok(())
}

fn validate_layout(layout: &LocationLayout) -> LoadResult<()> {
    let width = layout.width();
    anyhow::ensure!(width > 0, "location {} has no tiles", layout.id);

    for (y, row) in layout.rows.iter().enumerate() {
        anyhow::ensure!(
            row.chars().count() == width,
            "location {} row {} has {} tiles, expected {}",
            layout.id,
            y,
            row.chars().count(),
            width
        );
        if let Some(cell) = row
            .chars()
            .find(|cell| *cell != LocationLayout::WALL && *cell != LocationLayout::FLOOR)
        {
            anyhow::bail!("location {} row {} has unknown tile {:?}", layout.id, y, cell);
        }
    }
    Ok(())
}

fn validate_placement(scenario: &Scenario, role: &str, placement: &Placement) -> LoadResult<()> {
    let layout = find_layout(scenario, &placement.location)?;
    anyhow::ensure!(
        layout.is_floor(placement.tile),
        "{} starts on {:?} in {}, which is not a floor tile",
        role,
        placement.tile,
        placement.location
    );
    anyhow::ensure!(placement.speed > 0, "{} speed must be positive", role);
    Ok(())
}

fn find_layout<'a>(scenario: &'a Scenario, id: &LocationId) -> LoadResult<&'a LocationLayout> {
    scenario
        .location(id)
        .ok_or_else(|| anyhow::anyhow!("unknown location {}", id))
}
