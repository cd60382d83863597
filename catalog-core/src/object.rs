//! Generic object list wrapper and spec/status accessors.
use crate::metadata::ListMeta;
use serde::{Deserialize, Serialize};

/// A generic service catalog object list
///
/// This is used instead of a full struct for `InstanceList`, `BindingList`, etc.
/// It is produced from list queries, and carries the list level metadata
/// (continuation token and resource version) next to the items.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ObjectList<T>
where
    T: Clone,
{
    /// ListMeta - only really used for its `resourceVersion` and `continue` token
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items we are actually interested in.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T: Clone> ObjectList<T> {
    /// `iter` returns an Iterator over the elements of this ObjectList
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_core::{metadata::ListMeta, ObjectList};
    ///
    /// let metadata: ListMeta = Default::default();
    /// let items = vec![1, 2, 3];
    /// let objectlist = ObjectList { metadata, items };
    ///
    /// let first = objectlist.iter().next();
    /// assert_eq!(first, Some(&1));
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// `iter_mut` returns an Iterator of mutable references to the elements of this ObjectList
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Number of items in this page of results
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page of results is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The token to fetch the next page with, if the server has more results
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata.continue_.as_deref().filter(|t| !t.is_empty())
    }
}

impl<T: Clone> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a ObjectList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A trait to access the `spec` of a resource.
pub trait HasSpec {
    /// The type of the `spec` of this resource
    type Spec;

    /// Returns a reference to the `spec` of the object
    fn spec(&self) -> &Self::Spec;

    /// Returns a mutable reference to the `spec` of the object
    fn spec_mut(&mut self) -> &mut Self::Spec;
}

/// A trait to access the `status` of a resource.
///
/// The status is only ever written through the status subresource.
pub trait HasStatus {
    /// The type of the `status` object
    type Status;

    /// Returns an optional reference to the `status` of the object
    fn status(&self) -> Option<&Self::Status>;

    /// Returns an optional mutable reference to the `status` of the object
    fn status_mut(&mut self) -> &mut Option<Self::Status>;
}
