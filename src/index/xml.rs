//! XML rendering of the index document.
//!
//! Output is a ReaPack-style index:
//!
//! ```text
//! <index version="1" name="..." desc="...">
//!   <category name="...">
//!     <reapack name="..." type="script" desc="...">
//!       <metadata>
//!         <description>...</description>
//!       </metadata>
//!       <version name="1.0.0" author="...">
//!         <source file="install/path">https://...</source>
//!       </version>
//!     </reapack>
//!   </category>
//! </index>
//! ```

use std::fmt::Write as _;

use crate::core::{IndexDocument, PackageDescriptor};

/// Render the index as an XML document with two-space indentation.
pub fn render_index(index: &IndexDocument) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    let desc = index
        .desc
        .as_ref()
        .map(|d| format!(" desc=\"{}\"", escape_xml(d)))
        .unwrap_or_default();
    let _ = writeln!(
        xml,
        "<index version=\"1\" name=\"{}\"{}>",
        escape_xml(&index.name),
        desc
    );

    for category in index.categories() {
        let _ = writeln!(xml, "  <category name=\"{}\">", escape_xml(&category.name));
        for package in category.packages() {
            render_package(&mut xml, package);
        }
        xml.push_str("  </category>\n");
    }

    xml.push_str("</index>\n");
    xml
}

fn render_package(xml: &mut String, package: &PackageDescriptor) {
    let _ = writeln!(
        xml,
        "    <reapack name=\"{}\" type=\"script\" desc=\"{}\">",
        escape_xml(&package.name),
        escape_xml(&package.description)
    );
    xml.push_str("      <metadata>\n");
    let _ = writeln!(
        xml,
        "        <description>{}</description>",
        escape_xml(&package.description)
    );
    xml.push_str("      </metadata>\n");

    let time = package
        .time
        .as_ref()
        .map(|t| format!(" time=\"{}\"", escape_xml(t)))
        .unwrap_or_default();
    let _ = writeln!(
        xml,
        "      <version name=\"{}\" author=\"{}\"{}>",
        package.version,
        escape_xml(&package.author),
        time
    );

    for entry in package.entries() {
        let _ = writeln!(
            xml,
            "        <source file=\"{}\">{}</source>",
            escape_xml(&entry.install_path),
            escape_xml(&entry.url)
        );
    }

    xml.push_str("      </version>\n");
    xml.push_str("    </reapack>\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceEntry;
    use semver::Version;

    #[test]
    fn test_render_index() {
        let mut pkg = PackageDescriptor::new("Main", "Bar & <friends>", Version::new(1, 0, 0), "me");
        pkg.add_entry(SourceEntry {
            install_path: "MenuSets/Main.ReaperMenuSet".to_string(),
            source_path: "MenuSets/Main.ReaperMenuSet".to_string(),
            url: "https://x.invalid/MenuSets/Main.ReaperMenuSet".to_string(),
        });

        let mut index = IndexDocument::new("Suite");
        index.add_package("DF95/10 Toolbars", pkg);

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<index version="1" name="Suite">
  <category name="DF95/10 Toolbars">
    <reapack name="Main" type="script" desc="Bar &amp; &lt;friends&gt;">
      <metadata>
        <description>Bar &amp; &lt;friends&gt;</description>
      </metadata>
      <version name="1.0.0" author="me">
        <source file="MenuSets/Main.ReaperMenuSet">https://x.invalid/MenuSets/Main.ReaperMenuSet</source>
      </version>
    </reapack>
  </category>
</index>
"#;
        assert_eq!(render_index(&index), expected);
    }

    #[test]
    fn test_time_attribute() {
        let mut pkg = PackageDescriptor::new("P", "d", Version::new(2, 0, 1), "a")
            .with_time(Some("2024-01-01T00:00:00Z".to_string()));
        pkg.add_entry(SourceEntry {
            install_path: "a".to_string(),
            source_path: "a".to_string(),
            url: "u".to_string(),
        });
        let mut index = IndexDocument::new("S");
        index.add_package("C", pkg);

        let xml = render_index(&index);
        assert!(xml.contains("<version name=\"2.0.1\" author=\"a\" time=\"2024-01-01T00:00:00Z\">"));
    }

    #[test]
    fn test_index_desc_attribute() {
        let mut pkg = PackageDescriptor::new("P", "d", Version::new(1, 0, 0), "a");
        pkg.add_entry(SourceEntry {
            install_path: "a".to_string(),
            source_path: "a".to_string(),
            url: "u".to_string(),
        });
        let mut index =
            IndexDocument::new("S").with_desc(Some("Toolbars + required scripts/resources".to_string()));
        index.add_package("C", pkg);

        let xml = render_index(&index);
        assert!(xml.contains(
            "<index version=\"1\" name=\"S\" desc=\"Toolbars + required scripts/resources\">\n"
        ));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a'b\"c"), "a&apos;b&quot;c");
    }
}
