use serde::{Deserialize, Serialize};

use crate::domain::{CmdId, JobCommand, NewJobCommand, PageInfo, UpdateJobCommand};

/// Boolean flags travel as `"Yes"`/`"No"` strings. Decoding is a strict
/// string-equality contract: exactly `"Yes"` is true; `"No"`, the empty
/// string, `"yes"`, or an absent field all decode to false.
pub mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref() == Some("Yes"))
    }
}

/// One record as the list endpoint serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCommandRecord {
    #[serde(rename = "CmdId")]
    pub cmd_id: CmdId,
    #[serde(rename = "Type", default)]
    pub cmd_type: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "SubName", default)]
    pub sub_name: String,
    #[serde(rename = "ShortDesc", default)]
    pub short_desc: String,
    #[serde(rename = "LongDesc", default)]
    pub long_desc: String,
    #[serde(rename = "Path", default)]
    pub path: String,
    #[serde(rename = "Args", default)]
    pub args: String,
    #[serde(rename = "Default", with = "yes_no", default)]
    pub is_default: bool,
    #[serde(rename = "NeedsFile", with = "yes_no", default)]
    pub needs_file: bool,
    #[serde(rename = "CPUIntense", with = "yes_no", default)]
    pub cpu_intense: bool,
    #[serde(rename = "DiskIntense", with = "yes_no", default)]
    pub disk_intense: bool,
    #[serde(rename = "Sequence", default)]
    pub sequence: bool,
}

impl From<JobCommandRecord> for JobCommand {
    fn from(record: JobCommandRecord) -> Self {
        Self {
            cmd_id: record.cmd_id,
            cmd_type: record.cmd_type,
            name: record.name,
            sub_name: record.sub_name,
            short_desc: record.short_desc,
            long_desc: record.long_desc,
            path: record.path,
            args: record.args,
            is_default: record.is_default,
            needs_file: record.needs_file,
            cpu_intense: record.cpu_intense,
            disk_intense: record.disk_intense,
            sequence: record.sequence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCommandListBody {
    #[serde(rename = "JobCommands", default)]
    pub job_commands: Vec<JobCommandRecord>,
    #[serde(rename = "CurrentPage", default)]
    pub current_page: u32,
    #[serde(rename = "TotalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "TotalAvailable", default)]
    pub total_available: u32,
}

/// Envelope returned by `/JobQueue/GetJobCommandList`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCommandListEnvelope {
    #[serde(rename = "JobCommandList")]
    pub job_command_list: JobCommandListBody,
}

impl JobCommandListBody {
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_available: self.total_available,
        }
    }
}

/// Mutation outcome envelope. Success is signaled only by the string
/// `"true"` on the `bool` field, never by HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(rename = "bool")]
    pub outcome: String,
}

impl MutationResponse {
    pub fn succeeded(&self) -> bool {
        self.outcome == "true"
    }
}

/// Form body for `/JobQueue/CreateJobCommand`. `Sequence` is pinned to
/// `false` on this path; the client never reads it from a form.
#[derive(Debug, Clone, Serialize)]
pub struct CreateJobCommandParams {
    #[serde(rename = "Type")]
    pub cmd_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SubName")]
    pub sub_name: String,
    #[serde(rename = "ShortDesc")]
    pub short_desc: String,
    #[serde(rename = "LongDesc")]
    pub long_desc: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Args")]
    pub args: String,
    #[serde(rename = "Default", with = "yes_no")]
    pub is_default: bool,
    #[serde(rename = "NeedsFile", with = "yes_no")]
    pub needs_file: bool,
    #[serde(rename = "CPUIntense", with = "yes_no")]
    pub cpu_intense: bool,
    #[serde(rename = "DiskIntense", with = "yes_no")]
    pub disk_intense: bool,
    #[serde(rename = "Sequence")]
    pub sequence: bool,
}

impl From<NewJobCommand> for CreateJobCommandParams {
    fn from(cmd: NewJobCommand) -> Self {
        Self {
            cmd_type: cmd.cmd_type,
            name: cmd.name,
            sub_name: cmd.sub_name,
            short_desc: cmd.short_desc,
            long_desc: cmd.long_desc,
            path: cmd.path,
            args: cmd.args,
            is_default: cmd.is_default,
            needs_file: cmd.needs_file,
            cpu_intense: cmd.cpu_intense,
            disk_intense: cmd.disk_intense,
            sequence: false,
        }
    }
}

/// Form body for `/JobQueue/UpdateJobCommand`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateJobCommandParams {
    #[serde(rename = "CmdId")]
    pub cmd_id: CmdId,
    #[serde(rename = "Type")]
    pub cmd_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SubName")]
    pub sub_name: String,
    #[serde(rename = "ShortDesc")]
    pub short_desc: String,
    #[serde(rename = "LongDesc")]
    pub long_desc: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Args")]
    pub args: String,
    #[serde(rename = "Default", with = "yes_no")]
    pub is_default: bool,
    #[serde(rename = "NeedsFile", with = "yes_no")]
    pub needs_file: bool,
    #[serde(rename = "CPUIntense", with = "yes_no")]
    pub cpu_intense: bool,
    #[serde(rename = "DiskIntense", with = "yes_no")]
    pub disk_intense: bool,
    #[serde(rename = "Sequence")]
    pub sequence: bool,
}

impl From<UpdateJobCommand> for UpdateJobCommandParams {
    fn from(cmd: UpdateJobCommand) -> Self {
        Self {
            cmd_id: cmd.cmd_id,
            cmd_type: cmd.cmd_type,
            name: cmd.name,
            sub_name: cmd.sub_name,
            short_desc: cmd.short_desc,
            long_desc: cmd.long_desc,
            path: cmd.path,
            args: cmd.args,
            is_default: cmd.is_default,
            needs_file: cmd.needs_file,
            cpu_intense: cmd.cpu_intense,
            disk_intense: cmd.disk_intense,
            sequence: false,
        }
    }
}

/// Form body for `/JobQueue/DeleteJobCommand`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeleteJobCommandParams {
    #[serde(rename = "CmdId")]
    pub cmd_id: CmdId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct FlagProbe {
        #[serde(rename = "Default", with = "yes_no", default)]
        is_default: bool,
    }

    #[test]
    fn flag_decodes_true_only_for_exact_yes() {
        for (raw, expected) in [
            (json!({ "Default": "Yes" }), true),
            (json!({ "Default": "No" }), false),
            (json!({ "Default": "" }), false),
            (json!({ "Default": "yes" }), false),
            (json!({ "Default": "YES" }), false),
            (json!({}), false),
        ] {
            let probe: FlagProbe = serde_json::from_value(raw.clone()).expect("decode");
            assert_eq!(probe.is_default, expected, "input {raw}");
        }
    }

    #[test]
    fn flag_encodes_back_to_yes_no() {
        let record = JobCommandRecord {
            cmd_id: CmdId(3),
            cmd_type: "Transcode".into(),
            name: "Lossless".into(),
            sub_name: String::new(),
            short_desc: String::new(),
            long_desc: String::new(),
            path: "/usr/bin/transcode".into(),
            args: "%FILE%".into(),
            is_default: true,
            needs_file: false,
            cpu_intense: true,
            disk_intense: false,
            sequence: false,
        };
        let value = serde_json::to_value(&record).expect("encode");
        assert_eq!(value["Default"], "Yes");
        assert_eq!(value["NeedsFile"], "No");
        assert_eq!(value["CPUIntense"], "Yes");
        assert_eq!(value["DiskIntense"], "No");
    }

    #[test]
    fn list_envelope_decodes_records_and_paging() {
        let body = json!({
            "JobCommandList": {
                "JobCommands": [
                    {
                        "CmdId": 101,
                        "Type": "Transcode",
                        "Name": "Lossless",
                        "SubName": "mkv",
                        "ShortDesc": "short",
                        "LongDesc": "long",
                        "Path": "/usr/bin/transcode",
                        "Args": "%FILE%",
                        "Default": "Yes",
                        "NeedsFile": "Yes",
                        "CPUIntense": "No",
                        "DiskIntense": "No",
                        "Sequence": false
                    }
                ],
                "CurrentPage": 1,
                "TotalPages": 1,
                "TotalAvailable": 1
            }
        });

        let envelope: JobCommandListEnvelope = serde_json::from_value(body).expect("decode");
        let list = envelope.job_command_list;
        assert_eq!(list.page_info().total_available, 1);
        let command: JobCommand = list.job_commands[0].clone().into();
        assert_eq!(command.cmd_id, CmdId(101));
        assert!(command.is_default);
        assert!(command.needs_file);
        assert!(!command.cpu_intense);
        assert!(!command.sequence);
    }

    #[test]
    fn mutation_response_succeeds_only_on_literal_true() {
        for (raw, expected) in [("true", true), ("false", false), ("True", false), ("", false)] {
            let response: MutationResponse =
                serde_json::from_value(json!({ "bool": raw })).expect("decode");
            assert_eq!(response.succeeded(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn create_params_pin_sequence_false() {
        let new = NewJobCommand {
            cmd_type: "Transcode".into(),
            name: "Lossless".into(),
            sub_name: String::new(),
            short_desc: String::new(),
            long_desc: String::new(),
            path: "/usr/bin/transcode".into(),
            args: "%FILE%".into(),
            is_default: false,
            needs_file: false,
            cpu_intense: false,
            disk_intense: false,
        };
        let value = serde_json::to_value(CreateJobCommandParams::from(new)).expect("encode");
        assert_eq!(value["Sequence"], json!(false));
        assert_eq!(value["Default"], "No");
        assert_eq!(value["NeedsFile"], "No");
    }

    #[test]
    fn update_params_carry_the_identifier_and_pin_sequence() {
        let update = UpdateJobCommand {
            cmd_id: CmdId(7),
            cmd_type: "Metadata".into(),
            name: "Lookup".into(),
            sub_name: "tv".into(),
            short_desc: String::new(),
            long_desc: String::new(),
            path: "/usr/bin/lookup".into(),
            args: String::new(),
            is_default: true,
            needs_file: true,
            cpu_intense: false,
            disk_intense: true,
        };
        let value = serde_json::to_value(UpdateJobCommandParams::from(update)).expect("encode");
        assert_eq!(value["CmdId"], json!(7));
        assert_eq!(value["Sequence"], json!(false));
        assert_eq!(value["DiskIntense"], "Yes");
    }
}
