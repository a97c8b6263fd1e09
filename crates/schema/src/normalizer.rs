use crate::records::{FunctionRecord, ModuleRecord, ParameterRecord, Schema};
use anyhow::Context;
use juniscan_metadata::{Call, MetadataSource, Module};
use juniscan_primitives::{CallRef, DisplayCallRefOption, FunctionId, ModuleIndex, ParameterId};
use tracing::debug;


pub const SYSTEM_MODULE: &str = "System";


/// Id of a module's row.
///
/// `System` is always 0. Any other module takes its reported index,
/// unless that index is absent or 0, in which case its position in the
/// pallet list is used instead. Rows already stored downstream follow
/// this rule, so an index of 0 stays indistinguishable from a missing one.
pub fn module_id(position: usize, module: &Module) -> ModuleIndex {
    if module.name == SYSTEM_MODULE {
        return 0
    }
    match module.index {
        Some(index) if index != 0 => index,
        _ => position as ModuleIndex
    }
}


pub fn module_description(module: &Module) -> String {
    if module.docs.is_empty() {
        format!("No description available for {} module.", module.name)
    } else {
        module.docs.join(" ")
    }
}


pub fn function_description(module: &Module, call: &Call) -> String {
    if call.docs.is_empty() {
        format!("No description available for {} in {}.", call.name, module.name)
    } else {
        call.docs.join(" ")
    }
}


/// Accumulates the rows of all three tables during a single pass over the pallets.
///
/// Function and parameter ids are global counters shared by all modules.
#[derive(Default)]
pub struct SchemaBuilder {
    schema: Schema,
    next_function_id: FunctionId,
    next_parameter_id: ParameterId,
}


impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_module<S: MetadataSource + ?Sized>(
        &mut self,
        position: usize,
        module: &Module,
        source: &S
    ) -> anyhow::Result<()>
    {
        let module_id = module_id(position, module);

        self.schema.modules.push(ModuleRecord {
            id: module_id,
            name: module.name.clone(),
            description: module_description(module)
        });

        let calls = match module.calls.as_ref() {
            Some(calls) => calls,
            None => return Ok(())
        };

        for call in calls {
            self.push_function(module_id, module, call, source)?;
        }

        Ok(())
    }

    fn push_function<S: MetadataSource + ?Sized>(
        &mut self,
        module_id: ModuleIndex,
        module: &Module,
        call: &Call,
        source: &S
    ) -> anyhow::Result<()>
    {
        let function_id = self.next_function_id;
        self.next_function_id += 1;

        let description = function_description(module, call);

        debug!(
            module = %module.name,
            function = %call.name,
            call_index = call.index,
            encoded = %DisplayCallRefOption(CallRef::new(module.index, call.index)),
            description = %description,
            "function"
        );

        self.schema.functions.push(FunctionRecord {
            id: function_id,
            module_id,
            call_index: call.index,
            name: call.name.clone(),
            description
        });

        for (position, arg) in call.args.iter().enumerate() {
            let ty = source.resolve_type_name(arg.ty).with_context(|| {
                format!(
                    "failed to resolve type of argument {} of {}.{}",
                    position,
                    module.name,
                    call.name
                )
            })?;

            let name = match arg.name.as_ref() {
                Some(name) => name.clone(),
                None => format!("arg{}", position)
            };

            self.schema.parameters.push(ParameterRecord {
                id: self.next_parameter_id,
                function_id,
                name,
                ty
            });
            self.next_parameter_id += 1;
        }

        Ok(())
    }

    pub fn finish(self) -> Schema {
        self.schema
    }
}


/// Maps the pallets of `source` onto `module`, `function` and `function_parameters` rows.
///
/// Fails as a whole if any argument type can not be resolved.
pub fn normalize<S: MetadataSource + ?Sized>(source: &S) -> anyhow::Result<Schema> {
    let mut builder = SchemaBuilder::new();
    for (position, module) in source.modules().iter().enumerate() {
        builder.push_module(position, module, source)?;
    }
    Ok(builder.finish())
}
