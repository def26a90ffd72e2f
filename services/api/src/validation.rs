//! Per-entity payload validation
//!
//! Create payloads arrive with every field optional; the validators here
//! collect every violated required field into a single message, apply the
//! documented defaults, and hand back an insert-ready value. Update
//! payloads are re-checked only for the fields they supply.

use chrono::Utc;

use crate::error::ApiError;
use crate::models::{
    CreateAgency, CreateAttendance, CreateEmployee, CreateObservation, CreatePerformance,
    NewAgency, NewAttendance, NewEmployee, NewObservation, NewPerformance, UpdateAgency,
    UpdateAttendance, UpdateEmployee, UpdateObservation, UpdatePerformance,
    attendance::TIPOS_ASISTENCIA, observation::TIPOS_OBSERVACION,
};

pub const SEXOS: &[&str] = &["masculino", "femenino", "otro"];

fn required(value: Option<String>, message: &str, errors: &mut Vec<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            errors.push(message.to_string());
            String::new()
        }
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors.join(", ")))
    }
}

fn check_rating(value: i32, field: &str, errors: &mut Vec<String>) {
    if !(1..=5).contains(&value) {
        errors.push(format!("El campo {} debe estar entre 1 y 5", field));
    }
}

/// Validate an employee creation payload
pub fn employee_create(payload: CreateEmployee) -> Result<NewEmployee, ApiError> {
    let mut errors = Vec::new();

    let nombre = required(
        payload.nombre,
        "Por favor ingrese el nombre del empleado",
        &mut errors,
    );
    let apellido = required(
        payload.apellido,
        "Por favor ingrese el apellido del empleado",
        &mut errors,
    );
    let ci = required(
        payload.ci,
        "Por favor ingrese el ci del empleado",
        &mut errors,
    );
    let sexo = required(
        payload.sexo,
        "Por favor seleccione el sexo del empleado",
        &mut errors,
    );
    let puesto = required(
        payload.puesto,
        "Por favor ingrese el puesto del empleado",
        &mut errors,
    );

    if !sexo.is_empty() && !SEXOS.contains(&sexo.as_str()) {
        errors.push("El sexo debe ser masculino, femenino u otro".to_string());
    }

    finish(errors)?;

    // The derived default is computed here, not in the schema: an absent
    // cargo takes the value of puesto.
    let cargo = match payload.cargo {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => puesto.clone(),
    };

    Ok(NewEmployee {
        nombre,
        apellido,
        ci,
        sexo,
        edad: payload.edad,
        telefono: payload.telefono,
        direccion: payload.direccion,
        fecha_nacimiento: payload.fecha_nacimiento,
        fecha_contratacion: payload.fecha_contratacion.unwrap_or_else(Utc::now),
        puesto,
        cargo,
        agencia: payload.agencia,
        antecedentes: payload.antecedentes,
        cargos_anteriores: payload.cargos_anteriores,
        recomendaciones: payload.recomendaciones,
    })
}

/// Re-validate the fields supplied by an employee update
pub fn employee_update(payload: &UpdateEmployee) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    for (value, message) in [
        (&payload.nombre, "El campo nombre no puede quedar vacío"),
        (&payload.apellido, "El campo apellido no puede quedar vacío"),
        (&payload.ci, "El campo ci no puede quedar vacío"),
        (&payload.puesto, "El campo puesto no puede quedar vacío"),
    ] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(message.to_string());
            }
        }
    }

    if let Some(sexo) = &payload.sexo {
        if !SEXOS.contains(&sexo.as_str()) {
            errors.push("El sexo debe ser masculino, femenino u otro".to_string());
        }
    }

    finish(errors)
}

/// Validate an agency creation payload
pub fn agency_create(payload: CreateAgency) -> Result<NewAgency, ApiError> {
    let mut errors = Vec::new();

    let nombre = required(
        payload.nombre,
        "Por favor ingrese el nombre de la agencia",
        &mut errors,
    );
    let direccion = required(
        payload.direccion,
        "Por favor ingrese la dirección de la agencia",
        &mut errors,
    );
    let ciudad = required(payload.ciudad, "Por favor ingrese la ciudad", &mut errors);

    finish(errors)?;

    Ok(NewAgency {
        nombre,
        direccion,
        ciudad,
        telefono: payload.telefono,
        encargado: payload.encargado,
    })
}

/// Re-validate the fields supplied by an agency update
pub fn agency_update(payload: &UpdateAgency) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    for (value, message) in [
        (&payload.nombre, "El campo nombre no puede quedar vacío"),
        (&payload.direccion, "El campo dirección no puede quedar vacío"),
        (&payload.ciudad, "El campo ciudad no puede quedar vacío"),
    ] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(message.to_string());
            }
        }
    }

    finish(errors)
}

/// Validate an attendance creation payload
pub fn attendance_create(payload: CreateAttendance) -> Result<NewAttendance, ApiError> {
    let mut errors = Vec::new();

    if payload.empleado.is_none() {
        errors.push("Por favor indique el empleado".to_string());
    }

    let tipo_asistencia = payload
        .tipo_asistencia
        .unwrap_or_else(|| "presente".to_string());
    if !TIPOS_ASISTENCIA.contains(&tipo_asistencia.as_str()) {
        errors.push(format!(
            "El tipo de asistencia {} no es válido",
            tipo_asistencia
        ));
    }

    finish(errors)?;

    Ok(NewAttendance {
        empleado: payload
            .empleado
            .ok_or_else(|| ApiError::Validation("Por favor indique el empleado".to_string()))?,
        fecha: payload.fecha.unwrap_or_else(Utc::now),
        hora_entrada: payload.hora_entrada,
        hora_salida: payload.hora_salida,
        tipo_asistencia,
        observaciones: payload.observaciones,
    })
}

/// Re-validate the fields supplied by an attendance update
pub fn attendance_update(payload: &UpdateAttendance) -> Result<(), ApiError> {
    if let Some(tipo) = &payload.tipo_asistencia {
        if !TIPOS_ASISTENCIA.contains(&tipo.as_str()) {
            return Err(ApiError::Validation(format!(
                "El tipo de asistencia {} no es válido",
                tipo
            )));
        }
    }
    Ok(())
}

/// Validate a performance creation payload
pub fn performance_create(payload: CreatePerformance) -> Result<NewPerformance, ApiError> {
    let mut errors = Vec::new();

    if payload.empleado.is_none() {
        errors.push("Por favor indique el empleado".to_string());
    }

    let puntualidad = payload.puntualidad.unwrap_or(3);
    let proactividad = payload.proactividad.unwrap_or(3);
    let calidad_servicio = payload.calidad_servicio.unwrap_or(3);

    check_rating(puntualidad, "puntualidad", &mut errors);
    check_rating(proactividad, "proactividad", &mut errors);
    check_rating(calidad_servicio, "calidadServicio", &mut errors);

    finish(errors)?;

    Ok(NewPerformance {
        empleado: payload
            .empleado
            .ok_or_else(|| ApiError::Validation("Por favor indique el empleado".to_string()))?,
        fecha: payload.fecha.unwrap_or_else(Utc::now),
        puntualidad,
        proactividad,
        calidad_servicio,
        observaciones: payload.observaciones,
        evaluacion_personal: payload.evaluacion_personal,
    })
}

/// Re-validate the fields supplied by a performance update
pub fn performance_update(payload: &UpdatePerformance) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    for (value, field) in [
        (payload.puntualidad, "puntualidad"),
        (payload.proactividad, "proactividad"),
        (payload.calidad_servicio, "calidadServicio"),
    ] {
        if let Some(v) = value {
            check_rating(v, field, &mut errors);
        }
    }

    finish(errors)
}

/// Validate an observation creation payload
pub fn observation_create(payload: CreateObservation) -> Result<NewObservation, ApiError> {
    let mut errors = Vec::new();

    if payload.empleado.is_none() {
        errors.push("Por favor indique el empleado".to_string());
    }

    let titulo = required(
        payload.titulo,
        "Por favor ingrese el título de la observación",
        &mut errors,
    );
    let descripcion = required(
        payload.descripcion,
        "Por favor ingrese la descripción de la observación",
        &mut errors,
    );

    let tipo = payload.tipo.unwrap_or_else(|| "neutral".to_string());
    if !TIPOS_OBSERVACION.contains(&tipo.as_str()) {
        errors.push(format!("El tipo de observación {} no es válido", tipo));
    }

    finish(errors)?;

    Ok(NewObservation {
        empleado: payload
            .empleado
            .ok_or_else(|| ApiError::Validation("Por favor indique el empleado".to_string()))?,
        fecha: payload.fecha.unwrap_or_else(Utc::now),
        tipo,
        titulo,
        descripcion,
        desarrollo: payload.desarrollo,
    })
}

/// Re-validate the fields supplied by an observation update
pub fn observation_update(payload: &UpdateObservation) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if let Some(tipo) = &payload.tipo {
        if !TIPOS_OBSERVACION.contains(&tipo.as_str()) {
            errors.push(format!("El tipo de observación {} no es válido", tipo));
        }
    }

    for (value, message) in [
        (&payload.titulo, "El campo titulo no puede quedar vacío"),
        (
            &payload.descripcion,
            "El campo descripcion no puede quedar vacío",
        ),
    ] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(message.to_string());
            }
        }
    }

    finish(errors)
}
