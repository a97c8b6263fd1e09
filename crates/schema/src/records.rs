use juniscan_primitives::{CallIndex, FunctionId, ModuleIndex, ParameterId};


sql_table! {
    ModuleRecord("module") {
        id: ModuleIndex,
        name: String,
        description: String,
    }
}


sql_table! {
    FunctionRecord("function") {
        id: FunctionId,
        module_id: ModuleIndex,
        call_index: CallIndex,
        name: String,
        description: String,
    }
}


sql_table! {
    ParameterRecord("function_parameters") {
        id: ParameterId,
        function_id: FunctionId,
        name: String,
        ty as "type": String,
    }
}


/// The three tables produced from one runtime, rows in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub modules: Vec<ModuleRecord>,
    pub functions: Vec<FunctionRecord>,
    pub parameters: Vec<ParameterRecord>,
}
