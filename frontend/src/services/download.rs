use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Download a stored file by synthesizing a temporary link and clicking it
pub fn trigger_download(url: &str, file_name: &str) -> Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("No document available"))?;
    let body = document.body().ok_or_else(|| anyhow!("Document has no body"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| anyhow!("Failed to create link: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("Created element is not an anchor"))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.set_target("_blank");
    anchor.set_rel("noopener noreferrer");

    body.append_child(&anchor)
        .map_err(|e| anyhow!("Failed to attach link: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| anyhow!("Failed to detach link: {:?}", e))?;
    Ok(())
}
