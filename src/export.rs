//! Excel export functionality.

use crate::error::Result;
use crate::models::department::DeptNode;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::Path;

/// Export the department forest to an Excel file.
///
/// One row per department in depth-first order, with the name indented by
/// hierarchy level so the tree shape survives in the sheet.
pub fn export_departments_to_excel(forest: &[DeptNode], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Departments")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    // Headers
    let headers = ["ID", "Department", "Level", "Parent ID", "Order", "Active"];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 8)?; // ID
    worksheet.set_column_width(1, 40)?; // Department
    worksheet.set_column_width(2, 8)?; // Level
    worksheet.set_column_width(3, 10)?; // Parent ID
    worksheet.set_column_width(4, 8)?; // Order
    worksheet.set_column_width(5, 8)?; // Active

    // Data rows, depth-first
    let mut row: u32 = 0;
    let mut stack: Vec<(&DeptNode, u32)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, level)) = stack.pop() {
        row += 1;

        let indent = "  ".repeat(level as usize);
        worksheet.write_number(row, 0, node.id as f64)?;
        worksheet.write_string(row, 1, format!("{indent}{}", node.name))?;
        worksheet.write_number(row, 2, level as f64)?;
        match node.parent_id {
            Some(parent_id) => worksheet.write_number(row, 3, parent_id as f64)?,
            None => worksheet.write_string(row, 3, "")?,
        };
        worksheet.write_number(row, 4, node.display_order as f64)?;
        worksheet.write_string(row, 5, if node.is_active { "Yes" } else { "No" })?;

        for child in node.children.iter().rev() {
            stack.push((child, level + 1));
        }
    }

    // Autofilter
    if row > 0 {
        worksheet.autofilter(0, 0, row, 5)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
