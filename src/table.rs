use crate::HandlerId;

use std::collections::HashMap;

/// Insertion-ordered map from a path key to its handler chain.
///
/// Overwriting an existing key keeps its original position, so iteration
/// always follows first-registration order.
#[derive(Debug, Default, Clone)]
pub(crate) struct RouteTable {
    keys: Vec<Box<str>>,
    values: Vec<Vec<HandlerId>>,
    index: HashMap<Box<str>, usize>,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[HandlerId]> {
        let &i = self.index.get(key)?;
        self.values.get(i).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<HandlerId>> {
        let &i = self.index.get(key)?;
        self.values.get_mut(i)
    }

    pub fn set(&mut self, key: &str, value: Vec<HandlerId>) -> &mut Vec<HandlerId> {
        let i = match self.index.get(key) {
            Some(&i) => {
                self.values[i] = value;
                i
            }
            None => {
                let i = self.keys.len();
                self.keys.push(key.into());
                self.values.push(value);
                self.index.insert(key.into(), i);
                i
            }
        };
        &mut self.values[i]
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(|k| &**k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HandlerId])> + '_ {
        self.keys
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (&**k, v.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<HandlerId>)> + '_ {
        self.keys
            .iter()
            .zip(self.values.iter_mut())
            .map(|(k, v)| (&**k, v))
    }
}
