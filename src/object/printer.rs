//! Text rendering of container contents.

use crate::object::view::ObjectView;
use std::fmt;
use std::marker::PhantomData;

/// Displays every element of a view, joined by a separator.
pub struct ArrayPrinter<'a, 'f, V: ?Sized> {
    view: &'a V,
    separator: &'a str,
    _flash: PhantomData<&'f ()>,
}

impl<'a, 'f, V: ?Sized> ArrayPrinter<'a, 'f, V> {
    pub fn new(view: &'a V, separator: &'a str) -> Self {
        Self {
            view,
            separator,
            _flash: PhantomData,
        }
    }
}

impl<'f, V> fmt::Display for ArrayPrinter<'_, 'f, V>
where
    V: ObjectView<'f>,
    V::Element: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.view.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
