fn underline(cell_width: usize, text_width: usize) -> String {
    " ".repeat(cell_width - text_width) + "─".repeat(text_width).as_str()
}

fn print_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) {
    for (cell, width) in cells.iter().zip(widths.iter()) {
        print!("  {:>width$}", cell.as_ref(), width = width);
    }
    println!();
}

/// Print right-aligned columns under an underlined header.
///
/// Widths are byte lengths, so non-ASCII cells will misalign.
pub fn print_table(header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.len()).collect();
    for row in rows {
        debug_assert_eq!(row.len(), header.len());
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    print_row(header, &widths);
    let lines: Vec<String> = header
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| underline(*width, cell.len()))
        .collect();
    print_row(&lines, &widths);
    for row in rows {
        print_row(row, &widths);
    }
}
