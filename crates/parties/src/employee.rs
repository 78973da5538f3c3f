use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure_exists, reject_duplicate, require_found, DeleteFailure, Entity, Lookup, Merge, Patch,
    RequiredFields, ServiceError, ServiceResult, StoreResult,
};
use stockhub_inventory::Warehouse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
}

impl Entity for Employee {
    const NAME: &'static str = "employee";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewEmployee {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeePatch {
    pub card_number_id: Patch<String>,
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub warehouse_id: Patch<i64>,
}

impl Merge<Employee> for EmployeePatch {
    fn is_empty(&self) -> bool {
        !(self.card_number_id.is_set()
            || self.first_name.is_set()
            || self.last_name.is_set()
            || self.warehouse_id.is_set())
    }

    fn merge(self, current: Employee) -> Employee {
        Employee {
            id: current.id,
            card_number_id: self.card_number_id.apply(current.card_number_id),
            first_name: self.first_name.apply(current.first_name),
            last_name: self.last_name.apply(current.last_name),
            warehouse_id: self.warehouse_id.apply(current.warehouse_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInboundOrders {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
    pub inbound_orders_count: i64,
}

pub trait EmployeeRepository: Lookup<Employee> {
    fn get_all(&self) -> StoreResult<Vec<Employee>>;
    fn create(&self, employee: &Employee) -> StoreResult<Employee>;
    fn update(&self, employee: &Employee) -> StoreResult<Employee>;
    fn delete(&self, id: i64) -> StoreResult<()>;
    fn report_inbound_orders(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<EmployeeInboundOrders>>;
}

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    warehouses: Arc<dyn Lookup<Warehouse>>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        warehouses: Arc<dyn Lookup<Warehouse>>,
    ) -> Self {
        Self {
            employees,
            warehouses,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Employee>> {
        self.employees.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Employee> {
        require_found(&*self.employees, id)
    }

    pub fn create(&self, input: NewEmployee) -> ServiceResult<Employee> {
        RequiredFields::new()
            .field("card_number_id", &input.card_number_id)
            .field("first_name", &input.first_name)
            .field("last_name", &input.last_name)
            .field("warehouse_id", &input.warehouse_id)
            .check()?;

        ensure_exists::<Warehouse, _>(&*self.warehouses, input.warehouse_id)?;
        self.reject_card_number(&input.card_number_id, None)?;

        let employee = Employee {
            id: 0,
            card_number_id: input.card_number_id,
            first_name: input.first_name,
            last_name: input.last_name,
            warehouse_id: input.warehouse_id,
        };
        self.employees
            .create(&employee)
            .map_err(|e| ServiceError::from_write(Employee::NAME, card_attr(&employee.card_number_id), e))
    }

    pub fn update(&self, id: i64, patch: EmployeePatch) -> ServiceResult<Employee> {
        let current = require_found(&*self.employees, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("card_number_id", &patch.card_number_id)
            .patched("first_name", &patch.first_name)
            .patched("last_name", &patch.last_name)
            .patched("warehouse_id", &patch.warehouse_id)
            .check()?;

        if let Some(&warehouse_id) = patch.warehouse_id.changed_from(&current.warehouse_id) {
            ensure_exists::<Warehouse, _>(&*self.warehouses, warehouse_id)?;
        }
        if let Some(card) = patch.card_number_id.changed_from(&current.card_number_id) {
            self.reject_card_number(card, Some(id))?;
        }

        let merged = patch.merge(current);
        self.employees
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Employee::NAME, card_attr(&merged.card_number_id), e))
    }

    /// A delete that fails after the lookup answers 422, not 500.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.employees, id)?;
        self.employees
            .delete(id)
            .map_err(|e| DeleteFailure::InvalidArguments.translate(Employee::NAME, e))
    }

    pub fn report_inbound_orders(
        &self,
        employee_id: Option<i64>,
    ) -> ServiceResult<Vec<EmployeeInboundOrders>> {
        if let Some(id) = employee_id {
            self.get_by_id(id)?;
        }
        self.employees
            .report_inbound_orders(employee_id)
            .map_err(ServiceError::from_store)
    }

    fn reject_card_number(&self, card_number_id: &str, except: Option<i64>) -> ServiceResult<()> {
        let all = self.employees.get_all().map_err(ServiceError::from_store)?;
        reject_duplicate(
            &all,
            card_number_id,
            |e: &Employee| e.card_number_id.as_str(),
            except,
            || card_attr(card_number_id),
        )
    }
}

fn card_attr(card_number_id: &str) -> String {
    format!("card_number_id: {card_number_id}")
}
