use super::reactor_error::ReactorError;
use super::units::{AmountOfSubstance, moles, si_amount};
use nalgebra::DVector;
use std::collections::{BTreeMap, HashMap};

/// Moles of every tracked species. The species set is fixed at construction;
/// only the amounts change.
#[derive(Debug, Clone, PartialEq)]
pub struct MolarInventory {
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// mol, in `names` order
    moles: DVector<f64>,
}

impl MolarInventory {
    /// All species start at zero except those in `initial` (amounts in mol).
    pub fn new(
        species: &[String],
        initial: &BTreeMap<String, AmountOfSubstance>,
    ) -> Result<Self, ReactorError> {
        let names = species.to_vec();
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let mut moles = DVector::zeros(names.len());
        for (name, amount) in initial {
            let i = index
                .get(name)
                .ok_or_else(|| ReactorError::UnknownSpecies(name.clone()))?;
            moles[*i] = si_amount(*amount);
        }
        Ok(Self {
            names,
            index,
            moles,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, species: &str) -> Option<usize> {
        self.index.get(species).copied()
    }

    pub fn contains(&self, species: &str) -> bool {
        self.index.contains_key(species)
    }

    pub fn get(&self, species: &str) -> Option<AmountOfSubstance> {
        self.index_of(species).map(|i| moles(self.moles[i]))
    }

    pub fn vector(&self) -> &DVector<f64> {
        &self.moles
    }

    pub(crate) fn vector_mut(&mut self) -> &mut DVector<f64> {
        &mut self.moles
    }

    /// Σ moles, mol
    pub fn total(&self) -> f64 {
        self.moles.sum()
    }

    /// Vector with `value` at the positions of the listed species, zero elsewhere.
    pub fn indicator(&self, species: &[String], value: f64) -> Result<DVector<f64>, ReactorError> {
        let mut v = DVector::zeros(self.len());
        for name in species {
            let i = self
                .index_of(name)
                .ok_or_else(|| ReactorError::UnknownSpecies(name.clone()))?;
            v[i] = value;
        }
        Ok(v)
    }
}
