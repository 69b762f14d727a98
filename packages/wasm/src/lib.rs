use std::fmt::Display;
use vellum_editor::{
    EditorConfig, EditorSession, FieldValue, InteractionMode, NodeAddress, NodeTarget,
    NodeTemplate, NodeUuid, ToolbarAction,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_address(indices: &[u32]) -> NodeAddress {
    NodeAddress::new(indices.iter().map(|i| *i as usize).collect())
}

fn from_address(address: &NodeAddress) -> Vec<u32> {
    address.indices().iter().map(|i| *i as u32).collect()
}

fn pinned(address: &[u32], uuid: &str) -> Result<NodeTarget, JsValue> {
    let uuid = uuid
        .parse::<NodeUuid>()
        .map_err(|e| js_error("Invalid uuid", e))?;
    Ok(NodeTarget::pinned(to_address(address), uuid))
}

fn js_error(context: &str, e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Editing session for one open resume, driven by the browser UI
#[wasm_bindgen]
pub struct ResumeEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl ResumeEditor {
    /// Open a document record (JSON). `config_json` is an optional editor config.
    #[wasm_bindgen(constructor)]
    pub fn new(record_json: &str, config_json: Option<String>) -> Result<ResumeEditor, JsValue> {
        let config = match config_json {
            Some(json) => {
                EditorConfig::from_json(&json).map_err(|e| js_error("Config error", e))?
            }
            None => EditorConfig::default(),
        };
        let session = EditorSession::from_json(record_json, &config)
            .map_err(|e| js_error("Load error", e))?;
        Ok(Self { session })
    }

    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        self.session.revision() as f64
    }

    /// Append a node built from a template (JSON); returns its address
    pub fn add(&mut self, parent: &[u32], template_json: &str) -> Result<Vec<u32>, JsValue> {
        let template: NodeTemplate = serde_json::from_str(template_json)
            .map_err(|e| js_error("Template error", e))?;
        let result = self
            .session
            .add(&to_address(parent), template.instantiate())
            .map_err(|e| js_error("Add failed", e))?;
        Ok(result.address.as_ref().map(from_address).unwrap_or_default())
    }

    /// Merge a field value (JSON) into `data[key]`.
    ///
    /// `uuid` is the node's uuid from `views()`; the write fails if another
    /// node has since moved into `address`.
    pub fn update(
        &mut self,
        address: &[u32],
        uuid: &str,
        key: &str,
        value_json: &str,
    ) -> Result<(), JsValue> {
        let target = pinned(address, uuid)?;
        let value: FieldValue = serde_json::from_str(value_json)
            .map_err(|e| js_error("Value error", e))?;
        self.session
            .update(target, key, value)
            .map_err(|e| js_error("Update failed", e))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleHidden)]
    pub fn toggle_hidden(&mut self, address: &[u32], uuid: &str) -> Result<(), JsValue> {
        let target = pinned(address, uuid)?;
        self.session
            .toggle_hidden(target)
            .map_err(|e| js_error("Toggle failed", e))?;
        Ok(())
    }

    /// Switch between `"interactive"` and `"static"` (print/export)
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: InteractionMode = serde_json::from_value(serde_json::Value::from(mode))
            .map_err(|e| js_error("Invalid mode", e))?;
        self.session.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = hoverOver)]
    pub fn hover_over(&mut self, address: &[u32]) {
        self.session.hover_over(to_address(address));
    }

    #[wasm_bindgen(js_name = hoverOut)]
    pub fn hover_out(&mut self, address: &[u32]) {
        self.session.hover_out(&to_address(address));
    }

    #[wasm_bindgen(js_name = isHovering)]
    pub fn is_hovering(&self, address: &[u32]) -> bool {
        self.session.is_hovering(&to_address(address))
    }

    #[wasm_bindgen(js_name = isSelected)]
    pub fn is_selected(&self, uuid: &str) -> bool {
        uuid.parse::<NodeUuid>()
            .map(|uuid| self.session.is_selected(uuid))
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isSelectBlocked)]
    pub fn is_select_blocked(&self, address: &[u32]) -> bool {
        self.session.is_select_blocked(&to_address(address))
    }

    /// Pointer click on a node region; returns whether selection changed
    pub fn click(&mut self, address: &[u32]) -> bool {
        self.session.click(&to_address(address))
    }

    /// Set or clear (`undefined`) the selection
    #[wasm_bindgen(js_name = updateSelected)]
    pub fn update_selected(&mut self, uuid: Option<String>) -> Result<(), JsValue> {
        let uuid = match uuid {
            Some(uuid) => Some(
                uuid.parse::<NodeUuid>()
                    .map_err(|e| js_error("Invalid uuid", e))?,
            ),
            None => None,
        };
        self.session.update_selected(uuid);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleEditFlag)]
    pub fn toggle_edit_flag(&mut self) -> bool {
        self.session.toggle_edit_flag()
    }

    /// Toolbar option tree (JSON) for the node at `address`
    #[wasm_bindgen(js_name = toolbarOptions)]
    pub fn toolbar_options(&self, address: &[u32]) -> Result<String, JsValue> {
        let options = self
            .session
            .toolbar_for(&to_address(address))
            .map_err(|e| js_error("Toolbar failed", e))?;
        serde_json::to_string(&options).map_err(|e| js_error("Serialization error", e))
    }

    /// Run a toolbar action (the `action` JSON of an option leaf)
    pub fn invoke(&mut self, action_json: &str) -> Result<(), JsValue> {
        let action: ToolbarAction = serde_json::from_str(action_json)
            .map_err(|e| js_error("Action error", e))?;
        self.session
            .invoke(&action)
            .map_err(|e| js_error("Action failed", e))?;
        Ok(())
    }

    /// Per-node render flags (JSON array, depth-first)
    pub fn views(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.views())
            .map_err(|e| js_error("Serialization error", e))
    }

    /// Current document as a plain record (JSON)
    #[wasm_bindgen(js_name = toRecord)]
    pub fn to_record(&self) -> Result<String, JsValue> {
        self.session
            .to_record()
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_address_is_reported() {
        let mut editor = ResumeEditor::new(r#"{"nodes": []}"#, None).unwrap();
        let uuid = vellum_editor::NodeUuid::new().to_string();
        let error = editor.update(&[4, 2], &uuid, "title", r#""X""#).unwrap_err();
        assert!(error.as_string().unwrap().contains("Invalid address"));
    }

    #[wasm_bindgen_test]
    fn test_stale_update_is_reported() {
        let resume = r#"{"nodes": [{"type": "section", "children": [{"type": "entry"}, {"type": "entry"}]}]}"#;
        let mut editor = ResumeEditor::new(resume, None).unwrap();
        let views: serde_json::Value = serde_json::from_str(&editor.views().unwrap()).unwrap();
        let first = views[1]["uuid"].as_str().unwrap().to_string();

        editor.toggle_hidden(&[0, 0], &first).unwrap();
        let options: serde_json::Value =
            serde_json::from_str(&editor.toolbar_options(&[0, 0]).unwrap()).unwrap();
        let delete = options
            .as_array()
            .unwrap()
            .iter()
            .find(|option| option["label"] == "Delete")
            .unwrap();
        editor.invoke(&delete["action"].to_string()).unwrap();

        let error = editor.update(&[0, 0], &first, "title", r#""X""#).unwrap_err();
        assert!(error.as_string().unwrap().contains("Stale address"));
    }
}
