//! Error types for pioforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Project initialization errors
#[derive(Error, Debug)]
pub enum InitError {
    /// Directory not found
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Directory is not empty
    #[error("Directory is not empty: {path}. Use --force to initialize anyway")]
    DirectoryNotEmpty { path: PathBuf },

    /// Project already has a manifest
    #[error("A manifest already exists at {path}")]
    AlreadyInitialized { path: PathBuf },

    /// IO error during initialization
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Library declaration and bundling errors
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Library name does not match the allowed pattern
    #[error("Invalid library name '{name}': must start with a letter and contain only letters, digits, '_' or '-'")]
    InvalidName { name: String },

    /// Two library declarations share the same name
    #[error("Duplicate library name '{name}'")]
    DuplicateName { name: String },

    /// Declared name does not match the directory it lives in
    #[error("Library '{declared}' is declared in directory '{directory}' (names must match)")]
    NameMismatch { declared: String, directory: String },

    /// An extra-file pattern did not resolve to exactly one file
    #[error("Reference '{pattern}' in library '{library}' resolved to {matches} files (expected exactly 1)")]
    InvalidReference {
        library: String,
        pattern: String,
        matches: usize,
    },

    /// Two files would land at the same destination inside the bundle
    #[error("Library '{library}' has colliding destination file '{file}'")]
    FileCollision { library: String, file: String },

    /// Header file is missing
    #[error("Header '{path}' for library '{library}' does not exist")]
    MissingHeader { library: String, path: PathBuf },

    /// Source file is missing
    #[error("Source '{path}' for library '{library}' does not exist")]
    MissingSource { library: String, path: PathBuf },

    /// IO error during bundling
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Declaration parse error
    #[error("Failed to parse library declaration '{path}': {error}")]
    ParseError { path: PathBuf, error: String },
}

/// Dependency resolution errors
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Cyclic dependency detected
    #[error("Cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Missing dependency
    #[error("Missing dependency: '{dependency}' required by '{library}'")]
    MissingDependency { library: String, dependency: String },
}

/// Archive creation and extraction errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Failed to create an archive
    #[error("Failed to create archive '{path}': {error}")]
    Create { path: PathBuf, error: String },

    /// Failed to read an archive
    #[error("Failed to read archive '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to extract an archive entry
    #[error("Failed to extract '{path}': {error}")]
    Extract { path: PathBuf, error: String },

    /// Two archives carry different content for the same destination path
    #[error("Conflicting dependency: '{path}' from archive '{archive}' differs from already extracted content")]
    ConflictingDependency { path: PathBuf, archive: String },
}

/// Project assembly errors
#[derive(Error, Debug)]
pub enum AssembleError {
    /// Configuration file could not be rendered
    #[error("Failed to render platformio.ini: {error}")]
    ConfigRender { error: String },

    /// Main source file is missing
    #[error("Main source file '{path}' does not exist")]
    MissingMainSource { path: PathBuf },

    /// Archive error during extraction
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// External tool invocation errors
#[derive(Error, Debug)]
pub enum InvokerError {
    /// External tool is not on the declared PATH
    #[error("External tool '{tool}' not found on PATH '{path}'")]
    ToolNotFound { tool: String, path: String },

    /// Execution policy declares a sandbox
    #[error("Refusing to run '{tool}': execution policy declares sandboxed execution, but the toolchain requires direct host access")]
    SandboxedPolicy { tool: String },

    /// External tool exited non-zero
    #[error("External tool failed (exit code {code}): {command}\n{output}")]
    ExternalToolFailure {
        command: String,
        code: i32,
        output: String,
    },

    /// IO error spawning or waiting for the tool
    #[error("Failed to run '{command}': {error}")]
    IoError { command: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Top-level pioforge error type
#[derive(Error, Debug)]
pub enum PioforgeError {
    /// Manifest not found
    #[error("Manifest not found at '{path}'. Run 'pioforge init' to create a project.")]
    ManifestNotFound { path: String },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    ManifestParse { source: toml::de::Error },

    /// Init error
    #[error("Init error: {0}")]
    Init(#[from] InitError),

    /// Library error
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Resolver error
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),

    /// Archive error
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Assembly error
    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),

    /// Invoker error
    #[error("Invoker error: {0}")]
    Invoker(#[from] InvokerError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
