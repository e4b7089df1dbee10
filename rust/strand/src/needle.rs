/// What to look for in a collection: a value compared by equality, or a
/// predicate.
///
/// References convert into `Needle::Value`, so `c.after(&2)` works directly;
/// predicates are wrapped with [`Needle::when`].
pub enum Needle<'a, T> {
    Value(&'a T),
    Matches(Box<dyn Fn(&T) -> bool + 'a>),
}

impl<'a, T> Needle<'a, T> {
    pub fn value(value: &'a T) -> Needle<'a, T> {
        Needle::Value(value)
    }

    pub fn when(predicate: impl Fn(&T) -> bool + 'a) -> Needle<'a, T> {
        Needle::Matches(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            Needle::Value(value) => item == *value,
            Needle::Matches(predicate) => predicate(item),
        }
    }
}

impl<'a, T> From<&'a T> for Needle<'a, T> {
    fn from(value: &'a T) -> Self {
        Needle::Value(value)
    }
}
