//! Field paths such as `metadata.creators[0].name`.

use std::fmt;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// How far past the end of a list a write may reach.
pub const MAX_INDEX_GAP: usize = 1024;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(k) => k.parse().ok(),
        }
    }
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse dotted/bracketed notation. Numeric dotted keys (`a.0`) are kept
    /// as keys and resolved against arrays at lookup time.
    pub fn parse(path: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = path.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let after_index = matches!(segments.last(), Some(PathSegment::Index(_)));
                    if key.is_empty() && !after_index {
                        return Err(invalid("empty key"));
                    }
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            Some(_) => return Err(invalid("index must be numeric")),
                            None => return Err(invalid("unclosed bracket")),
                        }
                    }
                    if digits.is_empty() {
                        return Err(invalid("empty index"));
                    }
                    let index = digits.parse().map_err(|_| invalid("index out of range"))?;
                    segments.push(PathSegment::Index(index));
                }
                ']' => return Err(invalid("unexpected ']'")),
                other => key.push(other),
            }
        }

        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        } else if path.ends_with('.') {
            return Err(invalid("trailing '.'"));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Look up the value at this path.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(root, |current, segment| match current {
            Value::Object(map) => match segment {
                PathSegment::Key(k) => map.get(k),
                PathSegment::Index(i) => map.get(&i.to_string()),
            },
            Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Write `value` at this path, creating intermediate containers.
    ///
    /// A missing or primitive intermediate becomes an array when the next
    /// segment is an index, otherwise an object. Array slots between the
    /// current end and the target are padded with `null`; a target more than
    /// [`MAX_INDEX_GAP`] past the end is rejected.
    pub fn set(&self, root: &mut Value, value: Value) -> CoreResult<()> {
        let mut current = root;
        for (position, segment) in self.segments.iter().enumerate() {
            let next = self.segments.get(position + 1);
            let slot = self.child_slot(current, segment)?;
            if next.is_none() {
                *slot = value;
                return Ok(());
            }
            if !matches!(slot, Value::Object(_) | Value::Array(_)) {
                *slot = if next.and_then(PathSegment::as_index).is_some() {
                    Value::Array(Vec::new())
                } else {
                    Value::Object(serde_json::Map::new())
                };
            }
            current = slot;
        }
        Ok(())
    }

    fn child_slot<'a>(
        &self,
        current: &'a mut Value,
        segment: &PathSegment,
    ) -> CoreResult<&'a mut Value> {
        let array_index = segment.as_index().filter(|_| current.is_array());
        if let Some(index) = array_index {
            let Value::Array(items) = current else {
                unreachable!("checked to be an array above");
            };
            let reachable = items.len().saturating_add(MAX_INDEX_GAP);
            let needed = index.checked_add(1).filter(|&len| len <= reachable);
            let Some(len) = needed else {
                return Err(CoreError::InvalidPath {
                    path: self.to_string(),
                    reason: format!("index {} is too far past the end of the list", index),
                });
            };
            if items.len() < len {
                items.resize(len, Value::Null);
            }
            return Ok(&mut items[index]);
        }

        let key = match segment {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        };
        if !current.is_object() {
            *current = Value::Object(serde_json::Map::new());
        }
        Ok(match current {
            Value::Object(map) => map.entry(key).or_insert(Value::Null),
            _ => unreachable!("converted to an object above"),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if position == 0 => write!(f, "{}", k)?,
                PathSegment::Key(k) => write!(f, ".{}", k)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

/// Look up `path` in `root`; an unparsable path resolves to nothing.
pub fn get_in<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    FieldPath::parse(path).ok()?.get(root)
}

/// Write `value` at `path` in `root`.
pub fn set_in(root: &mut Value, path: &str, value: Value) -> CoreResult<()> {
    FieldPath::parse(path)?.set(root, value)
}
