//! Configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Declarative range checks via `validator`
//! - Runtime semantic validation
//!
//! Every invalid parameter is rejected here, before any stepper exists.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::rng::SimRng;
use crate::error::{CompareError, CompareResult};
use crate::geometry::{City, Geometry};
use crate::steppers::GeneticParams;

/// Top-level comparison configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// City set.
    #[validate(nested)]
    #[serde(default)]
    pub cities: CitiesConfig,

    /// Genetic algorithm parameters.
    #[validate(nested)]
    #[serde(default)]
    pub genetic: GeneticConfig,

    /// Run loop settings.
    #[validate(nested)]
    #[serde(default)]
    pub run: RunConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            cities: CitiesConfig::default(),
            genetic: GeneticConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl CompareConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> CompareResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> CompareResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> CompareResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> CompareResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> CompareResult<()> {
        let coords = &self.cities.coordinates;
        if !coords.is_empty() && coords.len() < 2 {
            return Err(CompareError::config(format!(
                "explicit coordinates need at least 2 cities, got {}",
                coords.len()
            )));
        }
        if let Some(i) = coords
            .iter()
            .position(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            return Err(CompareError::config(format!(
                "coordinate {i} is not finite"
            )));
        }
        if !self.cities.bound.is_finite() {
            return Err(CompareError::config("coordinate bound must be finite"));
        }
        self.genetic_params().validate()
    }

    /// Number of cities the run will use.
    #[must_use]
    pub fn city_count(&self) -> usize {
        if self.cities.coordinates.is_empty() {
            self.cities.count
        } else {
            self.cities.coordinates.len()
        }
    }

    /// Build the immutable city set: explicit coordinates if given,
    /// otherwise `count` random cities from `cities.seed`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the city set is invalid.
    pub fn build_geometry(&self) -> CompareResult<Geometry> {
        if self.cities.coordinates.is_empty() {
            let mut rng = SimRng::new(self.cities.seed);
            Geometry::random(self.cities.count, self.cities.bound, &mut rng)
        } else {
            Geometry::new(
                self.cities
                    .coordinates
                    .iter()
                    .map(|&[x, y]| City::new(x, y))
                    .collect(),
            )
        }
    }

    /// Genetic parameters in stepper form.
    #[must_use]
    pub fn genetic_params(&self) -> GeneticParams {
        GeneticParams {
            population_size: self.genetic.population_size,
            generations: self.genetic.generations,
            mutation_rate: self.genetic.mutation_rate,
            parent_pool: self.genetic.parent_pool,
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct CompareConfigBuilder {
    city_count: Option<usize>,
    city_seed: Option<u64>,
    bound: Option<f64>,
    coordinates: Option<Vec<[f64; 2]>>,
    genetic_seed: Option<u64>,
    population_size: Option<usize>,
    generations: Option<u64>,
    mutation_rate: Option<f64>,
    max_ticks: Option<u64>,
}

impl CompareConfigBuilder {
    /// Set the number of random cities.
    #[must_use]
    pub const fn cities(mut self, n: usize) -> Self {
        self.city_count = Some(n);
        self
    }

    /// Set the city placement seed.
    #[must_use]
    pub const fn city_seed(mut self, seed: u64) -> Self {
        self.city_seed = Some(seed);
        self
    }

    /// Set the coordinate bound.
    #[must_use]
    pub const fn bound(mut self, bound: f64) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Use explicit coordinates instead of random placement.
    #[must_use]
    pub fn coordinates(mut self, coordinates: Vec<[f64; 2]>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Set the genetic algorithm seed.
    #[must_use]
    pub const fn genetic_seed(mut self, seed: u64) -> Self {
        self.genetic_seed = Some(seed);
        self
    }

    /// Set the population size.
    #[must_use]
    pub const fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the generation budget.
    #[must_use]
    pub const fn generations(mut self, generations: u64) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Set the per-gene mutation rate.
    #[must_use]
    pub const fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Bound the run to at most `ticks` ticks.
    #[must_use]
    pub const fn max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Build the configuration. Call [`CompareConfig::check`] to validate.
    #[must_use]
    pub fn build(self) -> CompareConfig {
        let mut config = CompareConfig::default();

        if let Some(n) = self.city_count {
            config.cities.count = n;
        }
        if let Some(seed) = self.city_seed {
            config.cities.seed = seed;
        }
        if let Some(bound) = self.bound {
            config.cities.bound = bound;
        }
        if let Some(coordinates) = self.coordinates {
            config.cities.coordinates = coordinates;
        }
        if let Some(seed) = self.genetic_seed {
            config.genetic.seed = seed;
        }
        if let Some(size) = self.population_size {
            config.genetic.population_size = size;
        }
        if let Some(generations) = self.generations {
            config.genetic.generations = generations;
        }
        if let Some(rate) = self.mutation_rate {
            config.genetic.mutation_rate = rate;
        }
        if self.max_ticks.is_some() {
            config.run.max_ticks = self.max_ticks;
        }

        config
    }
}

/// City set configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CitiesConfig {
    /// Number of random cities (ignored when `coordinates` is set).
    #[validate(range(min = 2))]
    #[serde(default = "default_city_count")]
    pub count: usize,
    /// Cities are placed in `[0, bound) × [0, bound)`.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_bound")]
    pub bound: f64,
    /// Placement seed.
    #[serde(default = "default_city_seed")]
    pub seed: u64,
    /// Explicit `[x, y]` coordinates.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

const fn default_city_count() -> usize {
    10
}

const fn default_bound() -> f64 {
    100.0
}

const fn default_city_seed() -> u64 {
    42
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            count: default_city_count(),
            bound: default_bound(),
            seed: default_city_seed(),
            coordinates: Vec::new(),
        }
    }
}

/// Genetic algorithm configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneticConfig {
    #[validate(range(min = 2))]
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[validate(range(min = 1))]
    #[serde(default = "default_generations")]
    pub generations: u64,
    /// Per-gene swap probability, in (0, 1].
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Parents are drawn from this many top individuals.
    #[validate(range(min = 2))]
    #[serde(default = "default_parent_pool")]
    pub parent_pool: usize,
    #[serde(default = "default_genetic_seed")]
    pub seed: u64,
}

const fn default_population_size() -> usize {
    20
}

const fn default_generations() -> u64 {
    100
}

const fn default_mutation_rate() -> f64 {
    0.1
}

const fn default_parent_pool() -> usize {
    10
}

const fn default_genetic_seed() -> u64 {
    7
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            parent_pool: default_parent_pool(),
            seed: default_genetic_seed(),
        }
    }
}

/// Run loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Stop after this many ticks even if steppers remain.
    #[serde(default)]
    pub max_ticks: Option<u64>,
    /// Text output prints every n-th frame.
    #[validate(range(min = 1))]
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

const fn default_log_every() -> u64 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: None,
            log_every: default_log_every(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CompareConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.cities.count, 10);
        assert!((config.cities.bound - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.genetic.population_size, 20);
        assert_eq!(config.genetic.generations, 100);
        assert!((config.genetic.mutation_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.genetic.parent_pool, 10);
        assert!(config.run.max_ticks.is_none());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CompareConfig::builder()
            .cities(6)
            .city_seed(1)
            .genetic_seed(2)
            .generations(30)
            .max_ticks(50)
            .build();

        assert_eq!(config.cities.count, 6);
        assert_eq!(config.cities.seed, 1);
        assert_eq!(config.genetic.seed, 2);
        assert_eq!(config.genetic.generations, 30);
        assert_eq!(config.run.max_ticks, Some(50));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
cities:
  count: 7
  seed: 3
genetic:
  generations: 40
";
        let config = CompareConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.cities.count, 7);
        assert_eq!(config.genetic.generations, 40);
        // Unspecified fields keep defaults
        assert_eq!(config.genetic.population_size, 20);
        assert_eq!(config.city_count(), 7);
    }

    #[test]
    fn test_config_explicit_coordinates() {
        let yaml = r"
cities:
  coordinates:
    - [0.0, 0.0]
    - [10.0, 0.0]
    - [10.0, 10.0]
    - [0.0, 10.0]
";
        let config = CompareConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.city_count(), 4);
        let geometry = config.build_geometry().unwrap();
        assert!((geometry.tour_length(&[0, 1, 2, 3]) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_rejects_one_city() {
        assert!(CompareConfig::from_yaml("cities:\n  count: 1\n").is_err());
        assert!(CompareConfig::from_yaml("cities:\n  coordinates: [[1.0, 2.0]]\n").is_err());
    }

    #[test]
    fn test_config_rejects_mutation_rate() {
        assert!(CompareConfig::from_yaml("genetic:\n  mutation_rate: 0.0\n").is_err());
        assert!(CompareConfig::from_yaml("genetic:\n  mutation_rate: 1.5\n").is_err());
        assert!(CompareConfig::from_yaml("genetic:\n  mutation_rate: 1.0\n").is_ok());
    }

    #[test]
    fn test_config_rejects_population() {
        assert!(CompareConfig::from_yaml("genetic:\n  population_size: 1\n").is_err());
        assert!(CompareConfig::from_yaml("genetic:\n  generations: 0\n").is_err());
        assert!(CompareConfig::from_yaml("genetic:\n  parent_pool: 1\n").is_err());
    }

    #[test]
    fn test_config_rejects_bound() {
        assert!(CompareConfig::from_yaml("cities:\n  bound: 0.0\n").is_err());
        assert!(CompareConfig::from_yaml("cities:\n  bound: -5.0\n").is_err());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(CompareConfig::from_yaml("citiez:\n  count: 5\n").is_err());
        assert!(CompareConfig::from_yaml("genetic:\n  elitism: 0.5\n").is_err());
    }

    #[test]
    fn test_config_rejects_log_every_zero() {
        assert!(CompareConfig::from_yaml("run:\n  log_every: 0\n").is_err());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = CompareConfig::builder().cities(5).max_ticks(9).build();
        let yaml = config.to_yaml().unwrap();
        let back = CompareConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.yaml");
        std::fs::write(&path, "cities:\n  count: 5\n").unwrap();

        let config = CompareConfig::load(&path).unwrap();
        assert_eq!(config.cities.count, 5);

        let missing = CompareConfig::load(dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(CompareError::Io(_))));
    }

    #[test]
    fn test_build_geometry_random_is_seeded() {
        let config = CompareConfig::builder().cities(8).city_seed(11).build();
        assert_eq!(
            config.build_geometry().unwrap(),
            config.build_geometry().unwrap()
        );
    }
}
