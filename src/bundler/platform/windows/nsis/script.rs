//! NSIS installer script generation.
//!
//! Renders [`Directive`]s into NSIS syntax and fills the installer template
//! with them and the release metadata.

use super::{
    directives::{Directive, DirectiveBlock},
    utils,
};
use crate::{
    bundler::{
        error::Result,
        template::{Template, TemplateContext},
    },
    source::FileList,
};

/// Placeholders an installer template cannot work without.
pub const REQUIRED_PLACEHOLDERS: [&str; 3] =
    ["install_file_list", "remove_file_list", "remove_dir_list"];

/// Release values substituted into the installer template.
#[derive(Debug, Clone)]
pub struct ScriptValues {
    /// Product name
    pub product: String,
    /// Raw version string (rendered as `v<version>`)
    pub version: String,
    /// Packaging root as seen from the script's directory
    pub root_path: String,
    /// Installer executable makensis should write
    pub output_file: String,
}

/// `$INSTDIR` joined with a slash-separated relative path.
fn install_dir_path(relative: &str) -> String {
    if relative.is_empty() {
        "$INSTDIR".to_string()
    } else {
        format!("$INSTDIR\\{}", utils::to_windows_path(relative))
    }
}

/// Renders one directive as an indented NSIS line (without newline).
pub fn render_directive(directive: &Directive) -> String {
    match directive {
        Directive::SetOutPath { dir } => format!("  SetOutPath \"{}\"", install_dir_path(dir)),
        Directive::InstallFile {
            source,
            rename: None,
        } => format!(
            "  File \"${{ROOT_PATH}}\\{}\"",
            utils::to_windows_path(source)
        ),
        Directive::InstallFile {
            source,
            rename: Some(name),
        } => format!(
            "  File /oname={} \"${{ROOT_PATH}}\\{}\"",
            name,
            utils::to_windows_path(source)
        ),
        Directive::RemoveFile { dest } => format!("  Delete \"{}\"", install_dir_path(dest)),
        Directive::RemoveDir { dir } => format!("  RMDir \"{}\"", install_dir_path(dir)),
    }
}

fn render_lines<'a>(directives: impl IntoIterator<Item = &'a Directive>) -> String {
    let mut out = String::new();
    for directive in directives {
        out.push_str(&render_directive(directive));
        out.push('\n');
    }
    out
}

/// Builds the template context for `files` (already filtered for Windows).
pub fn build_context(files: &FileList, values: &ScriptValues) -> TemplateContext {
    let block = DirectiveBlock::from_files(files);

    let mut install_file_list = String::from("  SetOverwrite try\n");
    install_file_list.push_str(&render_lines(block.install()));

    let mut context = TemplateContext::new();
    context
        .insert("product", values.product.as_str())
        .insert("version", format!("v{}", values.version))
        .insert(
            "version_nsis",
            utils::format_version_for_nsis(&values.version),
        )
        .insert("root_path", values.root_path.as_str())
        .insert("output_file", values.output_file.as_str())
        .insert("install_file_list", install_file_list)
        .insert("remove_file_list", render_lines(block.remove_files()))
        .insert("remove_dir_list", render_lines(&block.remove_dirs()));
    context
}

/// Generates the complete NSI script text.
///
/// Fails if the template lacks any of [`REQUIRED_PLACEHOLDERS`].
pub fn generate_nsi_script(
    template: &Template,
    files: &FileList,
    values: &ScriptValues,
) -> Result<String> {
    log::info!("Generating NSIS script for {} files", files.len());
    template.require(&REQUIRED_PLACEHOLDERS)?;
    Ok(template.render(&build_context(files, values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::windows::nsis::template::NSI_TEMPLATE;

    fn values() -> ScriptValues {
        ScriptValues {
            product: "demo".into(),
            version: "1.2.3".into(),
            root_path: "..".into(),
            output_file: "C:\\out\\demo-v1.2.3-windows-setup.exe".into(),
        }
    }

    #[test]
    fn renders_directives_in_nsis_syntax() {
        assert_eq!(
            render_directive(&Directive::SetOutPath {
                dir: "docs/a".into()
            }),
            r#"  SetOutPath "$INSTDIR\docs\a""#
        );
        assert_eq!(
            render_directive(&Directive::InstallFile {
                source: "docs/a/LICENSE".into(),
                rename: Some("LICENSE.txt".into())
            }),
            r#"  File /oname=LICENSE.txt "${ROOT_PATH}\docs\a\LICENSE""#
        );
        assert_eq!(
            render_directive(&Directive::RemoveFile {
                dest: "docs/a/LICENSE.txt".into()
            }),
            r#"  Delete "$INSTDIR\docs\a\LICENSE.txt""#
        );
        assert_eq!(
            render_directive(&Directive::RemoveDir { dir: String::new() }),
            r#"  RMDir "$INSTDIR""#
        );
    }

    #[test]
    fn context_holds_rendered_blocks() {
        let files = FileList::from_unsorted(["docs/a/LICENSE", "docs/a/x.js", "docs/b/y.js"]);
        let ctx = build_context(&files, &values());

        assert_eq!(ctx.get("version"), Some("v1.2.3"));
        assert_eq!(ctx.get("version_nsis"), Some("1.2.3.0"));
        assert_eq!(
            ctx.get("install_file_list"),
            Some(concat!(
                "  SetOverwrite try\n",
                "  SetOutPath \"$INSTDIR\\docs\\a\"\n",
                "  File /oname=LICENSE.txt \"${ROOT_PATH}\\docs\\a\\LICENSE\"\n",
                "  File \"${ROOT_PATH}\\docs\\a\\x.js\"\n",
                "  SetOutPath \"$INSTDIR\\docs\\b\"\n",
                "  File \"${ROOT_PATH}\\docs\\b\\y.js\"\n",
            ))
        );
        assert_eq!(
            ctx.get("remove_file_list"),
            Some(concat!(
                "  Delete \"$INSTDIR\\docs\\a\\LICENSE.txt\"\n",
                "  Delete \"$INSTDIR\\docs\\a\\x.js\"\n",
                "  Delete \"$INSTDIR\\docs\\b\\y.js\"\n",
            ))
        );
        assert_eq!(
            ctx.get("remove_dir_list"),
            Some(concat!(
                "  RMDir \"$INSTDIR\\docs\\b\"\n",
                "  RMDir \"$INSTDIR\\docs\\a\"\n",
                "  RMDir \"$INSTDIR\\docs\"\n",
            ))
        );
    }

    #[test]
    fn builtin_template_renders_without_leftover_placeholders() {
        let files = FileList::from_unsorted(["README.md", "lib/app.js"]);
        let script =
            generate_nsi_script(&Template::new(NSI_TEMPLATE), &files, &values()).unwrap();

        assert!(!script.contains("{{"));
        assert!(script.contains(r#"!define ROOT_PATH "..""#));
        assert!(script.contains(r#"!define PRODUCT_VERSION "v1.2.3""#));
        assert!(script.contains(r#"  File /oname=README.txt "${ROOT_PATH}\README.md""#));
        assert!(script.contains(r#"  Delete "$INSTDIR\README.txt""#));
    }

    #[test]
    fn template_without_file_lists_is_rejected() {
        let files = FileList::from_unsorted(["a.js"]);
        let err = generate_nsi_script(&Template::new("Name {{product}}"), &files, &values())
            .unwrap_err();
        assert!(err.to_string().contains("install_file_list"));
    }
}
