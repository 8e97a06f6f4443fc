use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::{info, info_span, warn};

use formfit_cli::prefs::FileStore;
use formfit_core::contact::ContactForm;
use formfit_core::encode::{ExportOptions, ExportedFile};
use formfit_core::i18n::Translator;
use formfit_core::requirement::{Dimensions, Requirement, RequirementFormat, REQUIREMENTS};
use formfit_core::upload::{mime_type_for_name, FileInput};
use formfit_core::{Adjustments, Wizard, WizardError};

use crate::cli::{ContactArgs, LanguageArgs, RequirementsArgs, ResizeArgs};

pub fn run_requirements(args: &RequirementsArgs) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Tab"),
        header_cell("Pixels"),
        header_cell("Printed size"),
        header_cell("Max size"),
        header_cell("Format"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for req in REQUIREMENTS
        .iter()
        .filter(|r| args.tab.is_none_or(|tab| r.category == tab))
    {
        table.add_row(requirement_row(req));
    }
    println!("{table}");
    Ok(())
}

/// Run the wizard on one file and write the export. Returns the written path.
pub fn run_resize(args: &ResizeArgs, translator: &Translator<FileStore>) -> Result<PathBuf> {
    let span = info_span!("resize", file = %args.file.display(), requirement = %args.requirement);
    let _guard = span.enter();

    let bytes = fs::read(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut wizard = Wizard::new();
    wizard
        .select_file(&FileInput::new(&name, mime_type_for_name(&name), &bytes))
        .map_err(|e| localized(e, translator))?;
    wizard
        .select_requirement(&args.requirement)
        .map_err(|e| localized(e, translator))?;
    wizard.next().map_err(|e| localized(e, translator))?;

    let editor = wizard
        .editor_mut()
        .ok_or_else(|| anyhow!("editor not available"))?;
    if let Some(rect) = args.crop {
        editor.enable_crop();
        editor.move_crop_box(0.0, 0.0)?;
        editor.resize_crop_box(rect.width, rect.height)?;
        editor.move_crop_box(rect.left, rect.top)?;
        editor.apply_crop()?;
    }
    for _ in 0..args.zoom_in {
        editor.zoom_in()?;
    }
    for _ in 0..args.zoom_out {
        editor.zoom_out()?;
    }
    editor.set_adjustments(Adjustments::new(args.brightness, args.contrast));

    let requirement = wizard
        .requirement()
        .ok_or_else(|| anyhow!("no document type selected"))?;
    let mut options = ExportOptions::for_requirement(requirement);
    if let Some(format) = args.format {
        options.format = format;
    }
    options.quality = args.quality;
    options.fit_size_limit = args.fit_size;

    let file = wizard.export(&options).map_err(|e| localized(e, translator))?;
    let path = write_export(&file, args.output_dir.as_deref())?;
    print_export(&file, &path, requirement);
    Ok(path)
}

pub fn run_language(args: &LanguageArgs, translator: &mut Translator<FileStore>) -> Result<()> {
    if let Some(language) = args.language {
        translator.set_language(language).with_context(|| {
            format!("save preference to {}", translator.store().path().display())
        })?;
        info!(%language, "language saved");
    }
    println!("{}", translator.language());
    println!("{}", translator.t("mainTitle"));
    Ok(())
}

/// Print every field error. Returns whether the form is valid.
pub fn run_validate_contact(args: &ContactArgs) -> bool {
    let form = ContactForm {
        name: args.name.clone(),
        email: args.email.clone(),
        subject: args.subject.clone(),
        message: args.message.clone(),
    };
    match form.validate() {
        Ok(()) => {
            println!("Contact form is valid.");
            true
        }
        Err(errors) => {
            for error in errors {
                println!("{}: {error}", error.field().as_str());
            }
            false
        }
    }
}

/// Turn a wizard error into the alert text in the active language.
fn localized(err: WizardError, translator: &Translator<FileStore>) -> anyhow::Error {
    match err.message_key() {
        Some(key) => anyhow::Error::new(err).context(translator.t(key).to_string()),
        None => anyhow::Error::new(err),
    }
}

fn write_export(file: &ExportedFile, output_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), size = file.bytes.len(), "export written");
    Ok(path)
}

fn print_export(file: &ExportedFile, path: &Path, requirement: &Requirement) {
    println!(
        "{} ({}x{}, {:.1} KB, quality {:.1})",
        path.display(),
        file.width,
        file.height,
        file.size_kb(),
        file.quality
    );
    if file.within_size_limit == Some(false) {
        let limit = requirement.max_size_kb.unwrap_or_default();
        warn!(limit_kb = limit, "export exceeds the size limit");
        println!("warning: larger than the {limit} KB limit; try --fit-size or a lower --quality");
    }
}

fn requirement_row(req: &Requirement) -> Vec<Cell> {
    let (width, height) = req.pixel_size();
    let printed = match req.dimensions {
        Dimensions::Centimeters { width, height, dpi } => {
            format!("{width} x {height} cm @ {dpi} dpi")
        }
        Dimensions::Pixels { .. } => "-".to_string(),
    };
    let max_size = req
        .max_size_kb
        .map_or_else(|| "-".to_string(), |kb| format!("{kb} KB"));
    let format = match req.format {
        RequirementFormat::Jpeg => "jpeg",
        RequirementFormat::Pdf => "pdf (exported as png)",
    };
    vec![
        Cell::new(req.id).add_attribute(Attribute::Bold),
        Cell::new(req.category),
        Cell::new(format!("{width} x {height}")),
        Cell::new(printed),
        Cell::new(max_size),
        Cell::new(format),
    ]
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
