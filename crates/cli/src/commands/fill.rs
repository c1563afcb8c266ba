use std::path::Path;

use ngsync::{FieldConfig, ReadyPage};
use serde_json::Value;

use super::OpenPage;
use crate::context::{CommandContext, parse_url};
use crate::error::{CliError, Result};
use crate::output::{ActionData, FillData};

pub async fn execute(ctx: &CommandContext, url: &str, form: &Path, data: Option<&Path>) -> Result<()> {
	let url = parse_url(url)?;
	let fields: Vec<FieldConfig> = serde_json::from_str(&read(form)?)?;
	let data: Value = match data {
		Some(path) => serde_json::from_str(&read(path)?)?,
		None => Value::Object(Default::default()),
	};

	let open = OpenPage::open(ctx).await?;
	let readiness = ctx.readiness();
	let ready = ReadyPage::new(&open.page, &readiness);
	ready.navigate_until_ready(&url, None).await;
	let results = ready.fill_out(&fields, &data).await;

	let report = FillData {
		fields: fields
			.iter()
			.zip(results)
			.map(|(field, applied)| ActionData {
				selector: field.selector.clone(),
				label: field.label.clone().unwrap_or_default(),
				applied,
			})
			.collect(),
	};
	open.finish(ctx, "fill", Ok(report)).await
}

fn read(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}
