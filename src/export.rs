//! Excel export and file dialogs.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};

use crate::models::AttendanceRecord;

/// Export attendance records to Excel file, in the order given.
pub fn export_records_to_excel(records: &[&AttendanceRecord], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Attendance Records")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let pending_format = Format::new().set_font_color(Color::RGB(0xC0504D));

    let headers = ["ID", "Roll Number", "Name", "Date", "Time", "Status", "Sync Status"];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_column_width(0, 8)?;
    worksheet.set_column_width(1, 14)?;
    worksheet.set_column_width(2, 25)?;
    worksheet.set_column_width(3, 12)?;
    worksheet.set_column_width(4, 10)?;
    worksheet.set_column_width(5, 10)?;
    worksheet.set_column_width(6, 12)?;

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_number(row, 0, record.id as f64)?;
        worksheet.write_string(row, 1, &record.roll_number)?;
        worksheet.write_string(row, 2, &record.name)?;
        worksheet.write_string(row, 3, record.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 4, record.time.format("%H:%M:%S").to_string())?;
        worksheet.write_string(row, 5, record.status.as_str())?;

        if record.synced {
            worksheet.write_string(row, 6, record.sync_label())?;
        } else {
            worksheet.write_string_with_format(row, 6, record.sync_label(), &pending_format)?;
        }
    }

    if !records.is_empty() {
        let last_row = records.len() as u32;
        worksheet.autofilter(0, 0, last_row, 6)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Open file dialog for a QR code image.
pub fn show_image_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Upload QR Code Image")
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
        .pick_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("attendance_records");
        assert!(name.starts_with("attendance_records_"));
        assert!(name.ends_with(".xlsx"));
        // prefix + '_' + YYYYMMDD_HHMMSS + ".xlsx"
        assert_eq!(name.len(), "attendance_records_".len() + 15 + 5);
    }

    #[test]
    fn test_export_records_writes_file() {
        let seed = SeedData::builtin().unwrap();
        let records: Vec<_> = seed.attendance_records.iter().collect();
        let path = std::env::temp_dir().join("attendance_scanner_export_test.xlsx");
        std::fs::remove_file(&path).ok();

        export_records_to_excel(&records, &path).unwrap();

        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_empty_records() {
        let path = std::env::temp_dir().join("attendance_scanner_export_empty.xlsx");
        export_records_to_excel(&[], &path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
