use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::houses::{self, SignPlacement};
use crate::chart::positions::{MotionState, PlanetPositions, PositionDeriver};
use crate::chart::solar::{self, CombustionState, MorningEvening, SolarPhase};
use crate::chart::{ChartError, Sect};
use crate::ephemeris::{Body, BodyPosition, EphemerisProvider, Instant, Observer};
use crate::western::Placement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// House system requested by the caller. Only equal houses are computed;
/// the other names are accepted so saved settings keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Equal,
    WholeSign,
    Placidus,
    Koch,
    Campanus,
}

impl FromStr for HouseSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "equal" => Ok(HouseSystem::Equal),
            "whole_sign" => Ok(HouseSystem::WholeSign),
            "placidus" => Ok(HouseSystem::Placidus),
            "koch" => Ok(HouseSystem::Koch),
            "campanus" => Ok(HouseSystem::Campanus),
            other => Err(format!("unknown house system: {other}")),
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Campanus => "campanus",
        })
    }
}

/// Everything derived for one body in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPlanet {
    pub position: BodyPosition,
    pub motion: MotionState,
    pub placement: SignPlacement,
    /// None for the Sun itself
    pub combustion: Option<CombustionState>,
    pub morning_evening: MorningEvening,
    pub house: usize,
    pub rejoicing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResult {
    pub instant: Instant,
    pub observer: Observer,
    pub ascendant: f64,
    pub ascendant_degraded: bool,
    pub house_cusps: [f64; 12],
    pub sect: Sect,
    pub planets: BTreeMap<Body, ChartPlanet>,
}

impl ChartResult {
    pub fn planet(&self, body: Body) -> Result<&ChartPlanet, ChartError> {
        self.planets.get(&body).ok_or(ChartError::MissingBody { body })
    }

    pub fn positions(&self) -> PlanetPositions {
        self.planets
            .iter()
            .map(|(&body, planet)| (body, planet.position))
            .collect()
    }

    pub fn daily_motions(&self) -> BTreeMap<Body, f64> {
        self.planets
            .iter()
            .map(|(&body, planet)| (body, planet.motion.daily_motion))
            .collect()
    }

    /// Sign placements, the input of the dignity evaluator.
    pub fn placements(&self) -> Vec<Placement> {
        self.planets
            .iter()
            .map(|(&body, planet)| Placement {
                body,
                sign: planet.placement.sign,
                degree_in_sign: planet.placement.degree_in_sign,
            })
            .collect()
    }

    pub fn solar_phase(&self, body: Body) -> Result<SolarPhase, ChartError> {
        let sun = self.planet(Body::Sun)?.position.longitude;
        let planet = self.planet(body)?;
        Ok(solar::solar_phase(
            body,
            planet.motion,
            planet.position.longitude,
            sun,
        ))
    }
}

/// Computes complete charts from an injected ephemeris provider.
#[derive(Clone)]
pub struct ChartCalculator {
    deriver: PositionDeriver,
    aspects: AspectCalculator,
    house_system: HouseSystem,
}

impl ChartCalculator {
    pub fn new(provider: Arc<dyn EphemerisProvider>) -> Self {
        Self {
            deriver: PositionDeriver::new(provider),
            aspects: AspectCalculator::new(),
            house_system: HouseSystem::Equal,
        }
    }

    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        if house_system != HouseSystem::Equal {
            log::warn!(
                "House system '{}' is not computed; using equal houses",
                house_system
            );
        }
        self.house_system = house_system;
        self
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn deriver(&self) -> &PositionDeriver {
        &self.deriver
    }

    /// Positions, motion, signs, houses, sect and solar relationships for
    /// every body. Only a failure of the position step itself is an error;
    /// motion and ascendant degrade instead.
    pub fn calculate_complete_chart(
        &self,
        instant: Instant,
        observer: Observer,
    ) -> Result<ChartResult, ChartError> {
        let positions = self.deriver.positions(instant, &observer)?;
        let ascendant = houses::ascendant(self.deriver.provider(), instant, &observer);
        let house_cusps = houses::house_cusps(ascendant.longitude);
        let sect = houses::sect_of_positions(&positions, ascendant.longitude)?;
        let sun_longitude = positions
            .get(&Body::Sun)
            .map(|p| p.longitude)
            .ok_or(ChartError::MissingBody { body: Body::Sun })?;

        let planets: BTreeMap<Body, ChartPlanet> = positions
            .iter()
            .map(|(&body, &position)| {
                let longitude = position.longitude;
                let planet = ChartPlanet {
                    position,
                    motion: self.deriver.motion(body, instant),
                    placement: houses::to_sign(longitude),
                    combustion: (body != Body::Sun)
                        .then(|| solar::combustion(longitude, sun_longitude)),
                    morning_evening: solar::morning_evening_for(body, longitude, sun_longitude),
                    house: houses::house_of(longitude, &house_cusps),
                    rejoicing: houses::rejoices(body, longitude, ascendant.longitude),
                };
                (body, planet)
            })
            .collect();

        log::debug!(
            "Chart at {}: ascendant {:.2}{}, {} sect",
            instant,
            ascendant.longitude,
            if ascendant.degraded { " (approximate)" } else { "" },
            sect
        );

        Ok(ChartResult {
            instant,
            observer,
            ascendant: ascendant.longitude,
            ascendant_degraded: ascendant.degraded,
            house_cusps,
            sect,
            planets,
        })
    }

    /// Aspects among `positions`, with direction taken from motion sampled
    /// at `instant`.
    pub fn calculate_all_aspects(&self, positions: &PlanetPositions, instant: Instant) -> Vec<Aspect> {
        let motions: BTreeMap<Body, f64> = positions
            .keys()
            .map(|&body| (body, self.deriver.motion(body, instant).daily_motion))
            .collect();
        self.aspects.all_aspects(positions, &motions)
    }

    /// Aspects of an already computed chart, reusing its motion.
    pub fn chart_aspects(&self, chart: &ChartResult) -> Vec<Aspect> {
        self.aspects
            .all_aspects(&chart.positions(), &chart.daily_motions())
    }
}
