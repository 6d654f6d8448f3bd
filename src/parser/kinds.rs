//! Kinds of sections, settings and code holders.

/// Kind of a top-level section of a robot file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    /// Lines before the first header
    Preamble,
    Settings,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
    /// A header that was not recognized (possibly misspelled)
    Unknown,
}

impl SectionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Preamble => "preamble",
            Self::Settings => "Settings",
            Self::Variables => "Variables",
            Self::TestCases => "Test Cases",
            Self::Tasks => "Tasks",
            Self::Keywords => "Keywords",
            Self::Comments => "Comments",
            Self::Unknown => "unknown",
        }
    }

    /// Sections whose lines are kept verbatim without building elements
    pub fn is_verbatim(&self) -> bool {
        matches!(self, Self::Preamble | Self::Comments | Self::Unknown)
    }

    pub fn holder_kind(&self) -> Option<HolderKind> {
        match self {
            Self::TestCases => Some(HolderKind::TestCase),
            Self::Tasks => Some(HolderKind::Task),
            Self::Keywords => Some(HolderKind::Keyword),
            _ => None,
        }
    }
}

/// Kind of an executable step holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HolderKind {
    TestCase,
    Task,
    Keyword,
}

impl HolderKind {
    pub fn section(&self) -> SectionKind {
        match self {
            Self::TestCase => SectionKind::TestCases,
            Self::Task => SectionKind::Tasks,
            Self::Keyword => SectionKind::Keywords,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TestCase => "test case",
            Self::Task => "task",
            Self::Keyword => "keyword",
        }
    }
}

/// Group of a general setting, used by consumers to partition imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingsGroup {
    Libraries,
    Resources,
    VariablesImports,
    Metadata,
    NoGroup,
}

/// Kind of a setting in the Settings table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingKind {
    Library,
    Resource,
    Variables,
    Documentation,
    Metadata,
    SuiteSetup,
    SuiteTeardown,
    TestSetup,
    TestTeardown,
    TaskSetup,
    TaskTeardown,
    TestTemplate,
    TaskTemplate,
    TestTimeout,
    TaskTimeout,
    ForceTags,
    DefaultTags,
    TestTags,
    KeywordTags,
    Unknown,
}

impl SettingKind {
    pub const ALL: [SettingKind; 20] = [
        Self::Library,
        Self::Resource,
        Self::Variables,
        Self::Documentation,
        Self::Metadata,
        Self::SuiteSetup,
        Self::SuiteTeardown,
        Self::TestSetup,
        Self::TestTeardown,
        Self::TaskSetup,
        Self::TaskTeardown,
        Self::TestTemplate,
        Self::TaskTemplate,
        Self::TestTimeout,
        Self::TaskTimeout,
        Self::ForceTags,
        Self::DefaultTags,
        Self::TestTags,
        Self::KeywordTags,
        Self::Unknown,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Library => "Library",
            Self::Resource => "Resource",
            Self::Variables => "Variables",
            Self::Documentation => "Documentation",
            Self::Metadata => "Metadata",
            Self::SuiteSetup => "Suite Setup",
            Self::SuiteTeardown => "Suite Teardown",
            Self::TestSetup => "Test Setup",
            Self::TestTeardown => "Test Teardown",
            Self::TaskSetup => "Task Setup",
            Self::TaskTeardown => "Task Teardown",
            Self::TestTemplate => "Test Template",
            Self::TaskTemplate => "Task Template",
            Self::TestTimeout => "Test Timeout",
            Self::TaskTimeout => "Task Timeout",
            Self::ForceTags => "Force Tags",
            Self::DefaultTags => "Default Tags",
            Self::TestTags => "Test Tags",
            Self::KeywordTags => "Keyword Tags",
            Self::Unknown => "",
        }
    }

    pub fn group(&self) -> SettingsGroup {
        match self {
            Self::Library => SettingsGroup::Libraries,
            Self::Resource => SettingsGroup::Resources,
            Self::Variables => SettingsGroup::VariablesImports,
            Self::Metadata => SettingsGroup::Metadata,
            _ => SettingsGroup::NoGroup,
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Self::Library | Self::Resource | Self::Variables)
    }

    /// Settings whose first argument names a keyword to run
    pub fn is_keyword_based(&self) -> bool {
        matches!(
            self,
            Self::SuiteSetup
                | Self::SuiteTeardown
                | Self::TestSetup
                | Self::TestTeardown
                | Self::TaskSetup
                | Self::TaskTeardown
                | Self::TestTemplate
                | Self::TaskTemplate
        )
    }
}

/// Kind of a bracketed setting inside a test case, task or keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSettingKind {
    Documentation,
    Tags,
    Setup,
    Teardown,
    Template,
    Timeout,
    Arguments,
    Return,
    Unknown,
}

impl LocalSettingKind {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Documentation => "[Documentation]",
            Self::Tags => "[Tags]",
            Self::Setup => "[Setup]",
            Self::Teardown => "[Teardown]",
            Self::Template => "[Template]",
            Self::Timeout => "[Timeout]",
            Self::Arguments => "[Arguments]",
            Self::Return => "[Return]",
            Self::Unknown => "",
        }
    }

    /// Whether the setting may appear inside a holder of the given kind
    pub fn is_applicable_to(&self, holder: HolderKind) -> bool {
        match self {
            Self::Documentation | Self::Tags | Self::Teardown | Self::Timeout => true,
            Self::Setup | Self::Template => holder != HolderKind::Keyword,
            Self::Arguments | Self::Return => holder == HolderKind::Keyword,
            Self::Unknown => false,
        }
    }
}
