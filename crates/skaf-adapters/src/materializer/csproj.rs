//! Minimal `.csproj` patching: set `AssemblyName` and `RootNamespace`.
//!
//! SDK-style project files are small and regular, so the edit is done on the
//! text: the first `<PropertyGroup>` gets both elements (replaced when already
//! present), or a new group is inserted right after the `<Project>` tag.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static PROJECT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Project(\s[^>]*)?>").expect("valid project tag pattern"));

static PROPERTY_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<PropertyGroup(\s[^>]*)?>(.*?)</PropertyGroup>")
        .expect("valid property group pattern")
});

static ASSEMBLY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<AssemblyName>.*?</AssemblyName>").expect("valid assembly name pattern")
});

static ROOT_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<RootNamespace>.*?</RootNamespace>").expect("valid root namespace pattern")
});

/// Returns the patched file, or `None` when there is no `<Project>` element.
pub fn set_namespace(csproj: &str, namespace: &str) -> Option<String> {
    let assembly = format!("<AssemblyName>{namespace}</AssemblyName>");
    let root = format!("<RootNamespace>{namespace}</RootNamespace>");

    if let Some(group) = PROPERTY_GROUP.captures(csproj) {
        let body = group.get(2)?;
        let indent = child_indent(body.as_str());

        let mut patched_body = body.as_str().to_string();
        patched_body = upsert(&ASSEMBLY_NAME, &patched_body, &assembly, &indent);
        patched_body = upsert(&ROOT_NAMESPACE, &patched_body, &root, &indent);

        let mut out = String::with_capacity(csproj.len() + 128);
        out.push_str(&csproj[..body.start()]);
        out.push_str(&patched_body);
        out.push_str(&csproj[body.end()..]);
        return Some(out);
    }

    let open = PROJECT_OPEN.find(csproj)?;
    let group = format!(
        "\n  <PropertyGroup>\n    {assembly}\n    {root}\n  </PropertyGroup>"
    );
    let mut out = String::with_capacity(csproj.len() + group.len());
    out.push_str(&csproj[..open.end()]);
    out.push_str(&group);
    out.push_str(&csproj[open.end()..]);
    Some(out)
}

/// Replace an existing element or append it at the end of the group body.
fn upsert(pattern: &Regex, body: &str, element: &str, indent: &str) -> String {
    if pattern.is_match(body) {
        return pattern.replace(body, NoExpand(element)).into_owned();
    }

    let trimmed = body.trim_end_matches([' ', '\t']);
    let closing_indent = &body[trimmed.len()..];
    let trimmed = trimmed.trim_end_matches(['\r', '\n']);
    let newline = if body.contains("\r\n") { "\r\n" } else { "\n" };
    format!("{trimmed}{newline}{indent}{element}{newline}{closing_indent}")
}

/// Indentation used by the first child element of a group body.
fn child_indent(body: &str) -> String {
    body.lines()
        .find(|line| line.trim_start().starts_with('<'))
        .map(|line| line[..line.len() - line.trim_start().len()].to_string())
        .unwrap_or_else(|| "    ".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"<Project Sdk="Microsoft.NET.Sdk">

  <PropertyGroup>
    <TargetFramework>net9.0</TargetFramework>
    <Nullable>enable</Nullable>
  </PropertyGroup>

  <ItemGroup>
    <PackageReference Include="xunit" Version="2.9.2" />
  </ItemGroup>

</Project>
"#;

    #[test]
    fn adds_both_elements_to_first_group() {
        let patched = set_namespace(GENERATED, "Acme.Api.Domain").unwrap();

        assert!(patched.contains(
            "    <Nullable>enable</Nullable>\n    <AssemblyName>Acme.Api.Domain</AssemblyName>\n    <RootNamespace>Acme.Api.Domain</RootNamespace>\n  </PropertyGroup>"
        ));
        assert!(patched.contains("<ItemGroup>"));
        assert!(patched.ends_with("</Project>\n"));
    }

    #[test]
    fn replaces_existing_values() {
        let existing = GENERATED.replace(
            "<Nullable>enable</Nullable>",
            "<RootNamespace>Old</RootNamespace>\n    <AssemblyName>Old</AssemblyName>",
        );
        let patched = set_namespace(&existing, "Acme.Api").unwrap();

        assert!(patched.contains("<RootNamespace>Acme.Api</RootNamespace>"));
        assert!(patched.contains("<AssemblyName>Acme.Api</AssemblyName>"));
        assert!(!patched.contains("Old"));
        assert_eq!(patched.matches("<RootNamespace>").count(), 1);
    }

    #[test]
    fn creates_group_when_missing() {
        let patched = set_namespace("<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n", "Acme.Api")
            .unwrap();
        assert_eq!(
            patched,
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <AssemblyName>Acme.Api</AssemblyName>\n    <RootNamespace>Acme.Api</RootNamespace>\n  </PropertyGroup>\n</Project>\n"
        );
    }

    #[test]
    fn not_a_project_file() {
        assert_eq!(set_namespace("hello", "Acme"), None);
    }
}
