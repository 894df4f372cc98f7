//! Contains the definition of [`SymbolRecord`] and its [`CodegenAnnex`].

use getset::CopyGetters;

/// Code generation metadata attached to a [`SymbolRecord`].
///
/// A record carries no annex until [`SymbolRecord::codegen_annex`] is first
/// called, at which point a default one (offset `0`, not local, no code) is
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Default, CopyGetters)]
pub struct CodegenAnnex {
    /// The offset of the symbol from the frame's stack base.
    #[get_copy = "pub"]
    stack_offset: i64,

    /// Whether the symbol lives in a function's stack frame rather than in
    /// static storage.
    #[get_copy = "pub"]
    is_local: bool,

    code: Vec<String>,
}

impl CodegenAnnex {
    /// Sets the stack offset of the symbol.
    pub fn set_stack_offset(&mut self, stack_offset: i64) {
        self.stack_offset = stack_offset;
    }

    /// Marks the symbol as local (or global).
    pub fn set_local(&mut self, is_local: bool) { self.is_local = is_local; }

    /// Returns the generated code lines, in the order they were added.
    #[must_use]
    pub fn code(&self) -> &[String] { &self.code }

    /// Appends a single generated code line.
    pub fn add_code(&mut self, line: impl Into<String>) {
        self.code.push(line.into());
    }

    /// Appends every line of `lines`, preserving their order.
    pub fn extend_code<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.code.extend(lines.into_iter().map(Into::into));
    }
}

/// One declared identifier.
///
/// Within a single scope, records are identified by [`Self::name`] alone: the
/// table never holds two records with the same name.
///
/// Cloning a record is a deep copy; the clone owns its own data sequence and,
/// if one was created, its own [`CodegenAnnex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    name: String,
    token_type: String,
    semantic_type: Option<String>,
    data: Vec<String>,
    codegen_annex: Option<CodegenAnnex>,
}

impl SymbolRecord {
    /// Creates a record with only a name and a token type.
    #[must_use]
    pub fn new(name: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token_type: token_type.into(),
            semantic_type: None,
            data: Vec::new(),
            codegen_annex: None,
        }
    }

    /// Creates a record that already knows its semantic type.
    #[must_use]
    pub fn with_semantic_type(
        name: impl Into<String>,
        token_type: impl Into<String>,
        semantic_type: impl Into<String>,
    ) -> Self {
        let mut record = Self::new(name, token_type);
        record.semantic_type = Some(semantic_type.into());
        record
    }

    /// Creates a record with a semantic type and auxiliary data strings.
    #[must_use]
    pub fn with_data(
        name: impl Into<String>,
        token_type: impl Into<String>,
        semantic_type: impl Into<String>,
        data: Vec<String>,
    ) -> Self {
        let mut record =
            Self::with_semantic_type(name, token_type, semantic_type);
        record.data = data;
        record
    }

    /// Returns the declared name of the symbol.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the token type the lexer assigned to the symbol.
    #[must_use]
    pub fn token_type(&self) -> &str { &self.token_type }

    /// Returns the semantic type, if one has been set.
    #[must_use]
    pub fn semantic_type(&self) -> Option<&str> {
        self.semantic_type.as_deref()
    }

    /// Sets (or replaces) the semantic type.
    pub fn set_semantic_type(&mut self, semantic_type: impl Into<String>) {
        self.semantic_type = Some(semantic_type.into());
    }

    /// Returns the auxiliary data strings, in the order they were added.
    #[must_use]
    pub fn data(&self) -> &[String] { &self.data }

    /// Replaces the whole auxiliary data sequence.
    pub fn set_data(&mut self, data: Vec<String>) { self.data = data; }

    /// Appends one auxiliary data string.
    pub fn add_data(&mut self, value: impl Into<String>) {
        self.data.push(value.into());
    }

    /// Returns the codegen annex, creating a default one on first access.
    pub fn codegen_annex(&mut self) -> &mut CodegenAnnex {
        self.codegen_annex.get_or_insert_with(CodegenAnnex::default)
    }

    /// Returns the codegen annex without creating it.
    #[must_use]
    pub const fn codegen_annex_if_present(&self) -> Option<&CodegenAnnex> {
        self.codegen_annex.as_ref()
    }
}

impl std::fmt::Display for SymbolRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.name, self.token_type)
    }
}
