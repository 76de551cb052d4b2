use std::{fmt, iter, mem, slice};

/// A single named capture: a parameter name from the trie and the query
/// segment bound to it.
#[derive(PartialEq, Eq, Ord, PartialOrd, Default, Copy, Clone)]
struct Param<'k, 'v> {
    key: &'k str,
    value: &'v str,
}

impl Param<'_, '_> {
    const EMPTY: Param<'static, 'static> = Param { key: "", value: "" };
}

/// The named parameters captured by [`Matcher::match_named`](crate::Matcher::match_named),
/// in the order their segments appear in the query.
///
/// ```rust
/// use segmatch::Matcher;
///
/// let mut matcher = Matcher::<()>::router();
/// matcher.insert("/users/:id/files/:file").unwrap();
///
/// let matched = matcher.match_named("/users/7/files/a.txt").unwrap();
/// assert_eq!(matched.params.get("id"), Some("7"));
/// assert_eq!(matched.params.get("file"), Some("a.txt"));
///
/// for (key, value) in matched.params.iter() {
///     println!("{key} = {value}");
/// }
/// ```
#[derive(Clone)]
pub struct Params<'k, 'v> {
    kind: ParamsKind<'k, 'v>,
}

// Most patterns have a small number of parameters, so we can avoid
// heap allocations in the common case.
const SMALL: usize = 3;

#[derive(Clone)]
enum ParamsKind<'k, 'v> {
    Small([Param<'k, 'v>; SMALL], usize),
    Large(Vec<Param<'k, 'v>>),
}

impl<'k, 'v> Params<'k, 'v> {
    pub(crate) fn new() -> Self {
        Self {
            kind: ParamsKind::Small([Param::EMPTY; SMALL], 0),
        }
    }

    fn as_slice(&self) -> &[Param<'k, 'v>] {
        match &self.kind {
            ParamsKind::Small(arr, len) => &arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of the first parameter captured under the given name.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'v str> {
        let key = key.as_ref();
        self.as_slice()
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value)
    }

    /// Returns an iterator over the `(name, value)` pairs.
    pub fn iter(&self) -> ParamsIter<'_, 'k, 'v> {
        ParamsIter {
            inner: self.as_slice().iter(),
        }
    }

    pub(crate) fn push(&mut self, key: &'k str, value: &'v str) {
        #[cold]
        fn drain_to_vec<T: Default>(len: usize, elem: T, arr: &mut [T; SMALL]) -> Vec<T> {
            let mut vec = Vec::with_capacity(len + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(elem);
            vec
        }

        let param = Param { key, value };
        match &mut self.kind {
            ParamsKind::Small(arr, len) => {
                if *len == SMALL {
                    self.kind = ParamsKind::Large(drain_to_vec(*len, param, arr));
                    return;
                }

                arr[*len] = param;
                *len += 1;
            }
            ParamsKind::Large(vec) => vec.push(param),
        }
    }

    pub(crate) fn pop(&mut self) {
        match &mut self.kind {
            ParamsKind::Small(arr, len) => {
                if *len > 0 {
                    *len -= 1;
                    arr[*len] = Param::EMPTY;
                }
            }
            ParamsKind::Large(vec) => {
                vec.pop();
            }
        }
    }
}

// Equality ignores how the captures happen to be stored.
impl PartialEq for Params<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Params<'_, '_> {}

impl Default for Params<'_, '_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Params<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'ps, 'k, 'v> IntoIterator for &'ps Params<'k, 'v> {
    type Item = (&'k str, &'v str);
    type IntoIter = ParamsIter<'ps, 'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the names and values of captured [parameters](crate::Params).
pub struct ParamsIter<'ps, 'k, 'v> {
    inner: slice::Iter<'ps, Param<'k, 'v>>,
}

impl<'k, 'v> Iterator for ParamsIter<'_, 'k, 'v> {
    type Item = (&'k str, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key, p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_, '_, '_> {}

impl iter::FusedIterator for ParamsIter<'_, '_, '_> {}
