use crate::{CatalogError, Result, Value, separated_by, write_identifier_quoted, write_placeholder};

/// Static mapping from an entity's external (camelCase) field names to its
/// column identifiers. Keys absent from the map compile under their own
/// name; restricting the accepted keys is the repository's job, done with
/// an allow-list before the patch ever reaches the compiler.
pub type FieldMap = &'static [(&'static str, &'static str)];

/// An insertion-ordered sparse field map: only the fields the caller
/// intends to change. An absent key means "leave unchanged"; a present key
/// holding a NULL value means "set the column to NULL".
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Patch {
    fields: Vec<(String, Value)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping first-insertion order when a key is assigned
    /// twice.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Reject any field outside the entity's allow-list. Repositories call
    /// this before compiling so that caller input never reaches the
    /// statement as an unvetted column identifier.
    pub fn ensure_allowed(&self, field_map: FieldMap) -> Result<()> {
        for (name, _) in self.iter() {
            if !field_map.iter().any(|(external, _)| *external == name) {
                return Err(CatalogError::validation(format!("unknown field: {name}")));
            }
        }
        Ok(())
    }

    /// Compile the patch into an assignment clause with positional
    /// placeholders.
    ///
    /// Pure and deterministic: fields are emitted in insertion order, the
    /// i-th field binds `$i`, and the column identifier comes from
    /// `field_map` or, failing that, the field name verbatim. An empty
    /// patch is rejected: the caller asked for a mutation, so compiling a
    /// zero-column update would silently turn it into a no-op.
    pub fn compile(&self, field_map: FieldMap) -> Result<SetClause> {
        if self.is_empty() {
            return Err(CatalogError::validation("no data"));
        }
        let mut assignments = String::with_capacity(self.len() * 16);
        let mut values = Vec::with_capacity(self.len());
        separated_by(
            &mut assignments,
            self.iter(),
            |out, (name, value)| {
                let column = field_map
                    .iter()
                    .find(|(external, _)| *external == name)
                    .map(|(_, column)| *column)
                    .unwrap_or(name);
                write_identifier_quoted(out, column);
                out.push('=');
                write_placeholder(out, values.len() + 1);
                values.push(value.clone());
            },
            ", ",
        );
        Ok(SetClause {
            assignments,
            values,
        })
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Patch {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut patch = Patch::new();
        for (name, value) in iter {
            patch.set(name, value);
        }
        patch
    }
}

/// The compiled half of an UPDATE statement: `"col"=$1, ...` fragments
/// joined by `", "`, plus the parameters they bind in the same order.
///
/// The compiler never emits the key predicate; callers append the row
/// identifier themselves at [`next_placeholder`](SetClause::next_placeholder)
/// so the same compiler serves every entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub assignments: String,
    pub values: Vec<Value>,
}

impl SetClause {
    /// The 1-based index of the first placeholder a caller may append
    /// after the assignments, e.g. for a WHERE key parameter.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}
