use crate::options::NotebookConfig;
use crate::types::*;

/// Calculate statistics for a notebook without rendering it
pub fn calculate_statistics(config: &NotebookConfig) -> Result<NotebookStatistics> {
    config.validate()?;

    let logical_pages = config.pages;
    let padded_pages = config.imposition.padded_page_count(logical_pages);
    let sheets = padded_pages / config.imposition.pages_per_sheet;

    Ok(NotebookStatistics {
        logical_pages,
        padded_pages,
        blank_pages_added: padded_pages - logical_pages,
        sheets,
        // One PDF page per printed sheet
        output_pages: sheets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ImpositionConfig;

    fn config(pages: usize, pages_per_sheet: usize) -> NotebookConfig {
        NotebookConfig {
            pages,
            imposition: ImpositionConfig {
                pages_per_sheet,
                fold_lines: true,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_single_page_sheets() {
        let stats = calculate_statistics(&config(7, 1)).unwrap();
        assert_eq!(stats.sheets, 7);
        assert_eq!(stats.blank_pages_added, 0);
    }

    #[test]
    fn test_two_up_pads_to_even() {
        let stats = calculate_statistics(&config(7, 2)).unwrap();
        assert_eq!(stats.padded_pages, 8);
        assert_eq!(stats.blank_pages_added, 1);
        assert_eq!(stats.sheets, 4);
    }

    #[test]
    fn test_booklet_pads_to_multiple_of_four() {
        let stats = calculate_statistics(&config(10, 4)).unwrap();
        assert_eq!(stats.padded_pages, 12);
        assert_eq!(stats.blank_pages_added, 2);
        assert_eq!(stats.sheets, 3);
        assert_eq!(stats.output_pages, 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(calculate_statistics(&config(8, 3)).is_err());
    }
}
