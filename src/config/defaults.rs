//! Fixed paths and default configuration values
//!
//! The library-root and project layouts are a contract with PlatformIO:
//! extracted bundles, the main source and the rendered configuration must
//! land at exactly these paths for the external tool to pick them up.

/// Manifest file name at the project root
pub const MANIFEST_NAME: &str = "pioforge.toml";

/// Directory holding library declarations
pub const LIBRARY_DIR: &str = "libraries";

/// Library declaration file name inside each library directory
pub const LIBRARY_DECL_NAME: &str = "library.toml";

/// Library root inside a bundle and the assembled project tree
pub const LIBRARY_ROOT: &str = "lib";

/// Fixed path of the main source inside the assembled project tree
pub const PROJECT_SOURCE_PATH: &str = "src/main.cpp";

/// Configuration file name inside the assembled project tree
pub const CONFIG_FILE_NAME: &str = "platformio.ini";

/// PlatformIO environment output directory inside the project tree
pub const PIO_ENV_DIR: &str = ".pioenvs";

/// Compiled firmware artifact names
pub const FIRMWARE_ELF: &str = "firmware.elf";
pub const FIRMWARE_HEX: &str = "firmware.hex";

/// External build tool executable name
pub const EXTERNAL_TOOL: &str = "platformio";

/// Minimal PATH the external tool is invoked with
pub const TOOL_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Directory for produced bundle archives, relative to the project root
pub const BUNDLE_DIR: &str = "build/bundles";

/// Staging area for bundle layouts, relative to the project root
pub const STAGE_DIR: &str = "build/stage";

/// Assembled project tree, relative to the project root
pub const PROJECT_TREE_DIR: &str = "build/project";

/// Directory for final build outputs, relative to the project root
pub const OUTPUT_DIR: &str = "output";

/// Generated upload script name inside the output directory
pub const UPLOAD_SCRIPT_NAME: &str = "upload.sh";

/// Default main source file name at the project root
pub const DEFAULT_MAIN_SOURCE: &str = "main.cpp";
