//! Module for shared constants used across the codebase

pub mod transform {
    /// Placeholder replaced by the captured value in `insert_captured` formats
    pub const VALUE_PLACEHOLDER: &str = "{value}";

    /// Default first number used by `number_lines`
    pub const DEFAULT_START_FROM: i64 = 1;

    /// Default width used by `indent` and `dedent`
    pub const DEFAULT_INDENT_WIDTH: usize = 2;

    /// Default width used by `json_beautify`
    pub const DEFAULT_JSON_INDENT: usize = 2;

    /// Widest indentation `json_beautify` will emit
    pub const MAX_JSON_INDENT: usize = 10;

    /// Fence delimiting code blocks
    pub const CODE_FENCE: &str = "```";
}

pub mod template {
    /// Template file extension
    pub const DEFAULT_TEMPLATE_EXT: &str = ".toml";

    /// Extension of JSON template exports
    pub const JSON_TEMPLATE_EXT: &str = ".json";

    /// Template applied when none is given
    pub const DEFAULT_TEMPLATE_NAME: &str = "remove-blank-lines";

    /// Category assigned to new templates
    pub const DEFAULT_CATEGORY: &str = "General";

    /// File of the templates directory holding the recently used templates
    pub const RECENT_FILE: &str = ".recent.toml";

    /// Number of recently used templates remembered by default
    pub const MAX_RECENT_TEMPLATES: usize = 10;

    /// Suffix appended to the name of duplicated templates
    pub const COPY_SUFFIX: &str = " (Copy)";

    /// Skeleton used when creating a new template file
    pub const NEW_TEMPLATE: &str = "id          = \"@id\"\n\
                                name        = \"@name\"\n\
                                description = \"\"\n\
                                category    = \"@category\"\n\
                                tags        = []\n\
                                starred     = false\n\n\
                                [[transformations]]\n\
                                id      = \"1\"\n\
                                type    = \"trim_lines\"\n\
                                enabled = true\n\
                                order   = 1\n\n\
                                [[transformations]]\n\
                                id      = \"2\"\n\
                                type    = \"remove_blank_lines\"\n\
                                enabled = true\n\
                                order   = 2\n";
}
