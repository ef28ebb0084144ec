//! Built-in NSI script template.
//!
//! Used when the project has no `support/installer_nsi.template` of its own.
//! `{{...}}` placeholders are filled by the packager; `${...}` are NSIS defines.

/// Default installer script.
pub const NSI_TEMPLATE: &str = r#"; {{product}} {{version}} installer
Unicode true

!define PRODUCT_NAME "{{product}}"
!define PRODUCT_VERSION "{{version}}"
!define ROOT_PATH "{{root_path}}"
!ifndef OUTPUT_FILE
  !define OUTPUT_FILE "{{output_file}}"
!endif

Name "${PRODUCT_NAME} ${PRODUCT_VERSION}"
OutFile "${OUTPUT_FILE}"
InstallDir "$PROGRAMFILES\${PRODUCT_NAME}"
RequestExecutionLevel admin
SetCompressor /SOLID lzma

VIProductVersion "{{version_nsis}}"
VIAddVersionKey "ProductName" "${PRODUCT_NAME}"
VIAddVersionKey "FileVersion" "${PRODUCT_VERSION}"
VIAddVersionKey "ProductVersion" "${PRODUCT_VERSION}"

!include "MUI2.nsh"

!insertmacro MUI_PAGE_WELCOME
!insertmacro MUI_PAGE_DIRECTORY
!insertmacro MUI_PAGE_INSTFILES
!insertmacro MUI_PAGE_FINISH

!insertmacro MUI_UNPAGE_CONFIRM
!insertmacro MUI_UNPAGE_INSTFILES

!insertmacro MUI_LANGUAGE "English"

Section "MainSection" SEC01
{{install_file_list}}SectionEnd

Section -Post
  SetOutPath "$INSTDIR"
  WriteUninstaller "$INSTDIR\uninst.exe"
SectionEnd

Section Uninstall
{{remove_file_list}}  Delete "$INSTDIR\uninst.exe"
{{remove_dir_list}}  RMDir "$INSTDIR"
SectionEnd
"#;
