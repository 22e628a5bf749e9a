use super::MethodDescription;
use crate::jvm::RenderDescriptor;

/// Predicate selecting elements (usually methods) of a type
pub trait ElementMatcher<T: ?Sized> {
    fn matches(&self, target: &T) -> bool;

    /// Matches when both matchers do (the second is only consulted if the first matches)
    fn and<M: ElementMatcher<T>>(self, other: M) -> And<Self, M>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Matches when either matcher does (the second is only consulted if the first doesn't)
    fn or<M: ElementMatcher<T>>(self, other: M) -> Or<Self, M>
    where
        Self: Sized,
    {
        Or(self, other)
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> ElementMatcher<T> for F {
    fn matches(&self, target: &T) -> bool {
        self(target)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct And<A, B>(A, B);

impl<T: ?Sized, A: ElementMatcher<T>, B: ElementMatcher<T>> ElementMatcher<T> for And<A, B> {
    fn matches(&self, target: &T) -> bool {
        self.0.matches(target) && self.1.matches(target)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Or<A, B>(A, B);

impl<T: ?Sized, A: ElementMatcher<T>, B: ElementMatcher<T>> ElementMatcher<T> for Or<A, B> {
    fn matches(&self, target: &T) -> bool {
        self.0.matches(target) || self.1.matches(target)
    }
}

/// Matches everything
pub fn any<T: ?Sized>() -> impl ElementMatcher<T> + Clone {
    |_: &T| true
}

/// Matches nothing
pub fn none<T: ?Sized>() -> impl ElementMatcher<T> + Clone {
    |_: &T| false
}

/// Methods with exactly this name
pub fn named(name: impl Into<String>) -> impl ElementMatcher<MethodDescription> + Clone {
    let name = name.into();
    move |method: &MethodDescription| method.internal_name() == name
}

/// Methods with exactly this descriptor
pub fn has_descriptor(
    descriptor: impl Into<String>,
) -> impl ElementMatcher<MethodDescription> + Clone {
    let descriptor = descriptor.into();
    move |method: &MethodDescription| method.descriptor.render() == descriptor
}
