/// Every selector and XPath the orchestrator touches, in one place.
///
/// These are pinned to a specific version of the Google Images markup and are
/// the most fragile part of the system; when the results page changes, this
/// is the struct to update. Tests and alternative targets can substitute
/// their own values.
#[derive(Debug, Clone)]
pub struct Locators {
    /// CSS selector whose presence means a CAPTCHA is blocking the page.
    pub captcha_indicator: String,
    /// CSS selector for the search query input.
    pub search_box: String,
    /// XPath of the tab control that switches to image results.
    pub images_tab: String,
    /// CSS selector for the image preview panel that opens after the
    /// operator clicks a result.
    pub detail_panel: String,
    /// XPath of the three-dot overflow button inside the preview panel.
    pub overflow_button: String,
    /// XPath of the Share entry in the overflow menu.
    pub share_option: String,
    /// CSS selector for the share popup.
    pub share_popup: String,
    /// XPath locating the copy-link control by its visible label.
    pub copy_link: String,
    /// XPath of the container holding the full-size preview image.
    pub preview_image: String,
}

impl Default for Locators {
    fn default() -> Self {
        Self {
            captcha_indicator: "#recaptcha".to_string(),
            search_box: "input[name='q']".to_string(),
            images_tab: r#"//*[@id="hdtb-sc"]/div/div/div[1]/div/div[2]/a/div"#.to_string(),
            detail_panel: ".RfPPs.vYoxve".to_string(),
            overflow_button:
                r#"//*[@id="Sva75c"]/div[2]/div[2]/div/div[2]/c-wiz/div/div[1]/div/div[2]/div[1]/button"#
                    .to_string(),
            share_option:
                r#"//*[@id="Sva75c"]/div[2]/div[2]/div/div[2]/c-wiz/div/div[1]/div/div[2]/div[1]/div/div[3]"#
                    .to_string(),
            share_popup: "#DDeXhf".to_string(),
            copy_link: r#"//div[@id='DDeXhf']//div[contains(text(), 'Click to copy link')]"#
                .to_string(),
            preview_image:
                r#"//*[@id="Sva75c"]/div[2]/div[2]/div/div[2]/c-wiz/div/div[2]/div[1]"#.to_string(),
        }
    }
}
