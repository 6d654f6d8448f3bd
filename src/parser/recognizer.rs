//! Recognition of headers, setting names and lexical markers.

use super::kinds::{LocalSettingKind, SectionKind, SettingKind};
use super::token::RobotLine;
use super::token_type::RobotTokenType;
use crate::base::constants::{EMPTY_CELL_MARKER, HEADER_SIMILARITY_THRESHOLD};
use crate::core::text_utils::{edit_distance, normalize_name};

/// Outcome of recognizing a header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    Recognized {
        kind: SectionKind,
        deprecated: bool,
    },
    /// Close to a known header; carries the suggested replacements
    Similar { suggestions: Vec<&'static str> },
    Unrecognized,
}

/// (normalized name, section, deprecated)
const HEADER_NAMES: &[(&str, SectionKind, bool)] = &[
    ("setting", SectionKind::Settings, false),
    ("settings", SectionKind::Settings, false),
    ("metadata", SectionKind::Settings, true),
    ("variable", SectionKind::Variables, false),
    ("variables", SectionKind::Variables, false),
    ("testcase", SectionKind::TestCases, false),
    ("testcases", SectionKind::TestCases, false),
    ("task", SectionKind::Tasks, false),
    ("tasks", SectionKind::Tasks, false),
    ("keyword", SectionKind::Keywords, false),
    ("keywords", SectionKind::Keywords, false),
    ("userkeyword", SectionKind::Keywords, true),
    ("userkeywords", SectionKind::Keywords, true),
    ("comment", SectionKind::Comments, false),
    ("comments", SectionKind::Comments, false),
];

const SUGGESTED_HEADERS: &[(&str, &str)] = &[
    ("settings", "*** Settings ***"),
    ("variables", "*** Variables ***"),
    ("testcases", "*** Test Cases ***"),
    ("tasks", "*** Tasks ***"),
    ("keywords", "*** Keywords ***"),
    ("comments", "*** Comments ***"),
];

/// Check whether a first-column cell starts a header
pub fn is_header_cell(text: &str) -> bool {
    text.starts_with('*')
}

pub fn recognize_header(text: &str) -> HeaderMatch {
    let name: String = normalize_name(&text.replace('*', ""));
    if let Some((_, kind, deprecated)) = HEADER_NAMES.iter().find(|(n, _, _)| *n == name) {
        return HeaderMatch::Recognized {
            kind: *kind,
            deprecated: *deprecated,
        };
    }

    let mut scored: Vec<(usize, &'static str)> = SUGGESTED_HEADERS
        .iter()
        .map(|(normalized, display)| (edit_distance(&name, normalized), *display))
        .filter(|(distance, _)| *distance <= HEADER_SIMILARITY_THRESHOLD)
        .collect();
    if scored.is_empty() {
        return HeaderMatch::Unrecognized;
    }
    scored.sort_by_key(|(distance, _)| *distance);
    HeaderMatch::Similar {
        suggestions: scored.into_iter().map(|(_, display)| display).collect(),
    }
}

/// (normalized name, kind, deprecated)
const SETTING_NAMES: &[(&str, SettingKind, bool)] = &[
    ("library", SettingKind::Library, false),
    ("resource", SettingKind::Resource, false),
    ("variables", SettingKind::Variables, false),
    ("documentation", SettingKind::Documentation, false),
    ("document", SettingKind::Documentation, true),
    ("metadata", SettingKind::Metadata, false),
    ("suitesetup", SettingKind::SuiteSetup, false),
    ("suiteprecondition", SettingKind::SuiteSetup, true),
    ("suiteteardown", SettingKind::SuiteTeardown, false),
    ("suitepostcondition", SettingKind::SuiteTeardown, true),
    ("testsetup", SettingKind::TestSetup, false),
    ("testprecondition", SettingKind::TestSetup, true),
    ("testteardown", SettingKind::TestTeardown, false),
    ("testpostcondition", SettingKind::TestTeardown, true),
    ("tasksetup", SettingKind::TaskSetup, false),
    ("taskteardown", SettingKind::TaskTeardown, false),
    ("testtemplate", SettingKind::TestTemplate, false),
    ("tasktemplate", SettingKind::TaskTemplate, false),
    ("testtimeout", SettingKind::TestTimeout, false),
    ("tasktimeout", SettingKind::TaskTimeout, false),
    ("forcetags", SettingKind::ForceTags, false),
    ("defaulttags", SettingKind::DefaultTags, false),
    ("testtags", SettingKind::TestTags, false),
    ("keywordtags", SettingKind::KeywordTags, false),
];

/// Recognize a setting declaration; unknown names give `Unknown`.
///
/// Returns the kind and whether the spelling is deprecated.
pub fn recognize_setting(text: &str) -> (SettingKind, bool) {
    let name = normalize_name(text.trim_end_matches(':'));
    SETTING_NAMES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, kind, deprecated)| (*kind, *deprecated))
        .unwrap_or((SettingKind::Unknown, false))
}

/// Recognize a bracketed setting (`[Tags]`); `None` when not bracketed.
pub fn recognize_local_setting(text: &str) -> Option<LocalSettingKind> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    let kind = match normalize_name(inner).as_str() {
        "documentation" => LocalSettingKind::Documentation,
        "tags" => LocalSettingKind::Tags,
        "setup" | "precondition" => LocalSettingKind::Setup,
        "teardown" | "postcondition" => LocalSettingKind::Teardown,
        "template" => LocalSettingKind::Template,
        "timeout" => LocalSettingKind::Timeout,
        "arguments" => LocalSettingKind::Arguments,
        "return" => LocalSettingKind::Return,
        _ => LocalSettingKind::Unknown,
    };
    Some(kind)
}

/// Old style loop header (`:FOR`, `: for`)
pub fn is_old_for_marker(text: &str) -> bool {
    text.starts_with(':') && normalize_name(&text[1..]) == "for"
}

/// Any loop header marker
pub fn is_for_marker(text: &str) -> bool {
    text == crate::base::constants::FOR_MARKER || is_old_for_marker(text)
}

pub fn is_for_in_marker(text: &str) -> bool {
    crate::base::constants::FOR_IN_MARKERS.contains(&text)
}

/// Tag comments, continuation markers and escaped empty cells of a line.
///
/// Lexical tags depend on the line alone, so this can be re-run on a
/// line at any time. `data_column` is the first column holding data (1
/// in code tables where column 0 names the holder).
pub fn tag_lexical(line: &mut RobotLine, data_column: usize) {
    let first_column = line.first_column;
    let mut in_comment = false;
    let mut seen_data = false;
    for (i, token) in line.tokens_mut().enumerate() {
        let column = first_column + i;
        token.types.remove(RobotTokenType::Comment);
        token.types.remove(RobotTokenType::PreviousLineContinue);
        token.types.remove(RobotTokenType::EmptyCell);
        if token.is_empty() && column < data_column {
            continue;
        }
        if !in_comment && token.starts_comment() {
            in_comment = true;
        }
        if in_comment {
            token.types.set_primary(RobotTokenType::Comment);
            continue;
        }
        if !seen_data && token.is_continuation_marker() {
            token.types.set_primary(RobotTokenType::PreviousLineContinue);
        } else if token.text() == EMPTY_CELL_MARKER {
            token.types.insert(RobotTokenType::EmptyCell);
        }
        seen_data = true;
    }
}
