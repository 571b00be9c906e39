//! Example: Create a styled xlsx file

use xlsheet::prelude::*;

fn main() -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let bold = workbook.add_font(Font::default().with_bold(true));
    let banded = workbook.add_fill(Fill::solid(Color::rgb(0xDD, 0xEB, 0xF7)));
    let money = workbook.add_number_format("#,##0.00");

    workbook.create_style("Header")?.base = BaseFormat::new().with_font(bold).with_fill(banded);
    let header = workbook.add_format(
        Format::from_base(BaseFormat::new().with_font(bold).with_fill(banded)).with_style("Header"),
    )?;
    let amount = workbook.add_format(
        Format::from_base(BaseFormat::new().with_number_format(money)).with_style("Normal"),
    )?;

    let sheet = workbook.get_sheet_by_index_mut(0)?;

    // Add header row
    sheet.set_value("A1", "Item")?;
    sheet.set_value("B1", "Amount")?;
    sheet.set_format("A1", header)?;
    sheet.set_format("B1", header)?;

    // Add data rows
    for (row, (item, value)) in [("Rent", 1200.0), ("Power", 84.5), ("Water", 31.25)]
        .into_iter()
        .enumerate()
    {
        let r = row as u32 + 1;
        sheet.set_value_at(r, 0, item);
        sheet.set_value_at(r, 1, value);
        sheet.set_format_at(r, 1, amount);
    }

    // Add total row
    sheet.set_value("A5", "Total")?;
    sheet.set_value("B5", CellValue::formula("=SUM(B2:B4)"))?;
    sheet.set_format("B5", amount)?;

    workbook.save("/tmp/styled.xlsx")?;
    println!("Saved /tmp/styled.xlsx");

    Ok(())
}
