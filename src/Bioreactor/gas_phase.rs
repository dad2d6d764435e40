use super::reactor_error::ReactorError;
use super::units::{VolumeRate, cubic_meters_per_second, si_flow};
use std::collections::BTreeMap;

/// Maps per-component gas flows to the driving fraction of each dissolved gas.
///
/// Every component has a composition over the dissolved species it carries;
/// pure O2 is `{dO2: 1}`, air is `{dO2: 0.21, dCO2: 0.00045}`, nitrogen is `{}`.
/// Inert components contribute to the total flow only.
#[derive(Debug, Clone, PartialEq)]
pub struct GasComposition {
    components: BTreeMap<String, BTreeMap<String, f64>>,
    dissolved: Vec<String>,
}

impl GasComposition {
    pub fn new(components: &BTreeMap<String, BTreeMap<String, f64>>, dissolved: Vec<String>) -> Self {
        Self {
            components: components.clone(),
            dissolved,
        }
    }

    pub fn knows(&self, component: &str) -> bool {
        self.components.contains_key(component)
    }

    pub fn check_flows(&self, flows: &BTreeMap<String, VolumeRate>) -> Result<(), ReactorError> {
        for component in flows.keys() {
            if !self.knows(component) {
                return Err(ReactorError::UnknownGasComponent(component.clone()));
            }
        }
        Ok(())
    }

    pub fn total_flow(&self, flows: &BTreeMap<String, VolumeRate>) -> VolumeRate {
        flows
            .values()
            .fold(cubic_meters_per_second(0.0), |total, flow| total + *flow)
    }

    /// Driving fraction of every dissolved gas. No flow at all gives zero fractions.
    pub fn fractions(
        &self,
        flows: &BTreeMap<String, VolumeRate>,
    ) -> Result<BTreeMap<String, f64>, ReactorError> {
        self.check_flows(flows)?;
        let mut fractions: BTreeMap<String, f64> =
            self.dissolved.iter().map(|s| (s.clone(), 0.0)).collect();
        let total = si_flow(self.total_flow(flows));
        if total == 0.0 {
            return Ok(fractions);
        }
        for (component, flow) in flows {
            let share = si_flow(*flow) / total;
            if let Some(composition) = self.components.get(component) {
                for (species, content) in composition {
                    *fractions.entry(species.clone()).or_insert(0.0) += share * content;
                }
            }
        }
        Ok(fractions)
    }
}
