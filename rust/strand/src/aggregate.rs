use strand_common::{Error, Result};
use strand_value::AsValue;

use crate::collection::Collection;
use crate::selector::Selector;

impl<T: AsValue> Collection<T> {
    /// Arithmetic mean of the values the selector derives from the elements.
    ///
    /// - [`Selector::Identity`] averages the numeric elements and skips the
    ///   rest (booleans are not numeric).
    /// - [`Selector::Field`] resolves the field on every element. A mapping
    ///   lacking the key fails with `KeyMissing`, any other element lacking
    ///   the attribute fails with `AttributeMissing`, and a non-numeric field
    ///   fails with `TypeMismatch`.
    /// - [`Selector::Callback`] must return a number for every element, else
    ///   `TypeMismatch`.
    ///
    /// Fails with `NoValues` when there is nothing to average.
    pub fn average(&self, selector: Selector<'_, T>) -> Result<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for item in self.iter() {
            let value = selector.select(item)?;
            match value.as_f64() {
                Some(v) => {
                    sum += v;
                    count += 1;
                }
                None if matches!(selector, Selector::Identity) => {
                    log::trace!("average skips non-numeric {}", value.type_name());
                }
                None => {
                    return Err(Error::type_mismatch(
                        "average",
                        format!(
                            "{} is {}, not a number",
                            selector.describe(),
                            value.type_name()
                        ),
                    ));
                }
            }
        }
        if count == 0 {
            return Err(Error::no_values("average"));
        }
        Ok(sum / count as f64)
    }
}
